use reqwest::StatusCode;
use thiserror::Error;

/// Failures while building the runtime [`Settings`](crate::Settings).
///
/// Reading and writing the config file reports through `anyhow` instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "GNEWS_API_KEY not found. Set it in the environment or run `citybrief configure`."
    )]
    MissingNewsApiKey,
}

/// Failures of a single upstream HTTP call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to reach {service}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{service} returned a malformed body")]
    MalformedBody {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} response is missing field `{field}`")]
    MissingField {
        service: &'static str,
        field: &'static str,
    },
}

/// Failures of one briefing run, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum BriefingError {
    #[error("Geocoding lookup failed")]
    Geocoding(#[source] ProviderError),

    #[error("Weather lookup failed")]
    Weather(#[source] ProviderError),

    #[error("News lookup failed")]
    News(#[source] ProviderError),

    #[error("Weather and news lookups both failed: weather: {weather}; news: {news}")]
    Both {
        weather: ProviderError,
        news: ProviderError,
    },
}
