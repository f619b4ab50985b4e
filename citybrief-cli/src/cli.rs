use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Context;
use citybrief_core::{Briefing, Config};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use crate::render::{Style, render_report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citybrief", version, about = "Current weather and top news for a city")]
pub struct Cli {
    /// GNews API key; takes precedence over a `.env` file and the key stored by `configure`.
    #[arg(long, env = "GNEWS_API_KEY", hide_env_values = true, global = true)]
    pub news_api_key: Option<String>,

    /// Bare output: no colors, no wind direction or condition.
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather and news for a city (the default).
    Show {
        /// City name; prompted for when absent.
        city: Option<String>,
    },

    /// Store the GNews API key in the config file.
    Configure,

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let style = if self.plain { Style::Plain } else { Style::Rich };
        let key = self.news_api_key;

        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::ConfigPath) => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
            Some(Command::Show { city }) => brief(key, city, style).await,
            None => brief(key, None, style).await,
        }
    }
}

const NEWS_KEY_VAR: &str = "GNEWS_API_KEY";

/// `GNEWS_API_KEY` from the nearest `.env` file, if there is one.
fn dotenv_news_key() -> Option<String> {
    let entries = dotenvy::dotenv_iter().ok()?;
    news_key_from(entries)
}

fn news_key_from<I>(entries: I) -> Option<String>
where
    I: IntoIterator<Item = dotenvy::Result<(String, String)>>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            entry
                .map_err(|err| warn!(%err, "skipping malformed .env entry"))
                .ok()
        })
        .find(|(name, _)| name == NEWS_KEY_VAR)
        .map(|(_, value)| value)
}

async fn brief(key: Option<String>, city: Option<String>, style: Style) -> anyhow::Result<()> {
    let key = key
        .filter(|key| !key.trim().is_empty())
        .or_else(dotenv_news_key);
    let config = Config::load()?;
    show(&mut io::stdout(), &config, key.as_deref(), city, style).await
}

fn configure() -> anyhow::Result<()> {
    let api_key = inquire::Password::new("GNews API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let mut config = Config::load()?;
    config.set_news_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved news API key to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Resolve the key, read the city, run the briefing and write everything to `out`.
///
/// A missing key is reported before the prompt and before any request is made.
async fn show<W: Write>(
    out: &mut W,
    config: &Config,
    key_override: Option<&str>,
    city: Option<String>,
    style: Style,
) -> anyhow::Result<()> {
    let settings = match config.resolve(key_override) {
        Ok(settings) => settings,
        Err(err) => {
            writeln!(out, "Error: {err}")?;
            return Ok(());
        }
    };
    debug!(?settings, "configuration resolved");

    let city = match city {
        Some(city) => city,
        None => tokio::task::spawn_blocking(read_city).await??,
    };

    let briefing = Briefing::from_settings(&settings);

    let place = if city.trim().is_empty() {
        None
    } else {
        briefing.locate(&city).await?
    };

    let Some(place) = place else {
        writeln!(out, "City not found.")?;
        writeln!(out, "Cannot fetch weather without valid coordinates.")?;
        return Ok(());
    };

    writeln!(out, "Fetching weather and news...")?;
    let report = briefing.gather(&city, place).await?;
    write!(out, "{}", render_report(&report, style))?;

    Ok(())
}

/// Read one line: an interactive prompt on a terminal, a plain line otherwise.
fn read_city() -> anyhow::Result<String> {
    if io::stdin().is_terminal() {
        return inquire::Text::new("City:")
            .prompt()
            .context("Failed to read city name");
    }

    print!("City: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read city name from stdin")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
