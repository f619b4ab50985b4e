use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

/// News provider credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    pub api_key: String,
}

/// Upstream endpoints. Each field falls back to the public service when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default = "default_news_url")]
    pub news_url: String,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_news_url() -> String {
    "https://gnews.io/api/v4/search".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            news_url: default_news_url(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [news]
/// api_key = "..."
///
/// [endpoints]
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub news: Option<NewsConfig>,

    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citybrief", "citybrief")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_news_api_key(&mut self, api_key: String) {
        self.news = Some(NewsConfig { api_key });
    }

    /// Returns the stored news API key, ignoring blank values.
    pub fn news_api_key(&self) -> Option<&str> {
        self.news
            .as_ref()
            .map(|news| news.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    /// Build the immutable runtime settings.
    ///
    /// `key_override` (flag or environment) wins over the stored key.
    pub fn resolve(&self, key_override: Option<&str>) -> Result<Settings, ConfigError> {
        let news_api_key = key_override
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .or_else(|| self.news_api_key())
            .ok_or(ConfigError::MissingNewsApiKey)?;

        Ok(Settings {
            news_api_key: news_api_key.to_string(),
            endpoints: self.endpoints.clone(),
        })
    }
}

/// Runtime settings, constructed once at startup and passed to whoever needs them.
#[derive(Clone)]
pub struct Settings {
    pub news_api_key: String,
    pub endpoints: Endpoints,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("news_api_key", &"<redacted>")
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_errors_when_no_key_anywhere() {
        let cfg = Config::default();
        let err = cfg.resolve(None).unwrap_err();

        assert!(matches!(err, ConfigError::MissingNewsApiKey));
        assert!(err.to_string().contains("GNEWS_API_KEY not found"));
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let mut cfg = Config::default();
        cfg.set_news_api_key("   ".into());

        assert_eq!(cfg.news_api_key(), None);
        assert!(cfg.resolve(Some("")).is_err());
    }

    #[test]
    fn override_wins_over_stored_key() {
        let mut cfg = Config::default();
        cfg.set_news_api_key("STORED".into());

        let settings = cfg.resolve(Some("FROM_ENV")).expect("key must resolve");
        assert_eq!(settings.news_api_key, "FROM_ENV");

        let settings = cfg.resolve(None).expect("key must resolve");
        assert_eq!(settings.news_api_key, "STORED");
    }

    #[test]
    fn settings_debug_redacts_key() {
        let settings = Config::default().resolve(Some("SECRET")).expect("key must resolve");
        let rendered = format!("{settings:?}");

        assert!(!rendered.contains("SECRET"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn partial_endpoints_fall_back_to_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [endpoints]
            news_url = "http://localhost:9000/search"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.endpoints.news_url, "http://localhost:9000/search");
        assert_eq!(cfg.endpoints.forecast_url, default_forecast_url());
        assert_eq!(cfg.endpoints.geocoding_url, default_geocoding_url());
        assert!(cfg.news.is_none());
    }

    #[test]
    fn save_then_load_keeps_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_news_api_key("KEY".into());
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.news_api_key(), Some("KEY"));
        assert_eq!(loaded.endpoints, Endpoints::default());
    }

    #[test]
    fn load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("load");

        assert!(cfg.news.is_none());
    }
}
