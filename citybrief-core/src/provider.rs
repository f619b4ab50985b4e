use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{
    error::ProviderError,
    model::{Coordinates, Headlines, Place, WeatherReport},
};

pub mod gnews;
pub mod openmeteo;

/// Resolves a free-text city name to its first matching place.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn locate(&self, city: &str) -> Result<Option<Place>, ProviderError>;
}

/// Current conditions at a pair of coordinates.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current_weather(&self, at: Coordinates) -> Result<WeatherReport, ProviderError>;
}

/// Recent news matching a query.
#[async_trait]
pub trait NewsSource: Send + Sync + Debug {
    async fn headlines(&self, query: &str) -> Result<Headlines, ProviderError>;
}

/// Issue a GET with an encoded query string and decode a JSON body.
///
/// Any non-2xx status is an error, whatever the body says.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    service: &'static str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, ProviderError> {
    let (status, body) = fetch(http, service, url, query).await?;

    if !status.is_success() {
        return Err(ProviderError::Status {
            service,
            status,
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|source| ProviderError::MalformedBody { service, source })
}

/// Like [`get_json`], but a JSON error body is decoded like any other body.
///
/// Used where the payload's own shape (a missing `results` or `articles` list) already
/// says "nothing here". Only a non-JSON body on a non-2xx status is a `Status` error.
pub(crate) async fn get_json_any_status<T: DeserializeOwned>(
    http: &Client,
    service: &'static str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, ProviderError> {
    let (status, body) = fetch(http, service, url, query).await?;

    match serde_json::from_str(&body) {
        Ok(parsed) => {
            if !status.is_success() {
                warn!(service, %status, body = %truncate_body(&body), "decoding error response");
            }
            Ok(parsed)
        }
        Err(_) if !status.is_success() => Err(ProviderError::Status {
            service,
            status,
            body: truncate_body(&body),
        }),
        Err(source) => Err(ProviderError::MalformedBody { service, source }),
    }
}

async fn fetch(
    http: &Client,
    service: &'static str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<(StatusCode, String), ProviderError> {
    debug!(service, url, "sending request");

    // reqwest errors carry the full request URL, credentials in the query included.
    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| ProviderError::Transport {
            service,
            source: source.without_url(),
        })?;

    let status = res.status();
    let body = res.text().await.map_err(|source| ProviderError::Transport {
        service,
        source: source.without_url(),
    })?;

    Ok((status, body))
}

pub(crate) fn require<T>(
    value: Option<T>,
    service: &'static str,
    field: &'static str,
) -> Result<T, ProviderError> {
    value.ok_or(ProviderError::MissingField { service, field })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
