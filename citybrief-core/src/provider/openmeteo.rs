use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    config::Endpoints,
    error::ProviderError,
    model::{Coordinates, Place, WeatherReport},
};

use super::{Geocoder, WeatherSource, get_json, get_json_any_status, require};

const GEOCODING: &str = "Open-Meteo geocoding";
const FORECAST: &str = "Open-Meteo forecast";

/// Open-Meteo geocoding search plus current-weather forecast. Neither needs a key.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(endpoints: &Endpoints) -> Self {
        Self {
            geocoding_url: endpoints.geocoding_url.clone(),
            forecast_url: endpoints.forecast_url.clone(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmSearchResponse {
    results: Option<Vec<OmSearchHit>>,
}

#[derive(Debug, Deserialize)]
struct OmSearchHit {
    name: Option<String>,
    country: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: Option<OmCurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    time: Option<String>,
    temperature: Option<f64>,
    windspeed: Option<f64>,
    winddirection: Option<f64>,
    weathercode: Option<i32>,
}

impl OmSearchResponse {
    fn into_place(self) -> Result<Option<Place>, ProviderError> {
        let Some(hit) = self.results.and_then(|hits| hits.into_iter().next()) else {
            return Ok(None);
        };

        Ok(Some(Place {
            name: hit.name,
            country: hit.country,
            coordinates: Coordinates {
                latitude: require(hit.latitude, GEOCODING, "latitude")?,
                longitude: require(hit.longitude, GEOCODING, "longitude")?,
            },
        }))
    }
}

impl OmForecastResponse {
    fn into_report(self) -> Result<WeatherReport, ProviderError> {
        let current = require(self.current_weather, FORECAST, "current_weather")?;

        Ok(WeatherReport {
            temperature_c: require(current.temperature, FORECAST, "temperature")?,
            wind_speed_mps: require(current.windspeed, FORECAST, "windspeed")?,
            wind_direction_deg: require(current.winddirection, FORECAST, "winddirection")?,
            weather_code: require(current.weathercode, FORECAST, "weathercode")?,
            observed_at: current.time.as_deref().and_then(parse_local_time),
        })
    }
}

fn parse_local_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").ok()
}

#[async_trait]
impl Geocoder for OpenMeteoProvider {
    #[instrument(skip(self))]
    async fn locate(&self, city: &str) -> Result<Option<Place>, ProviderError> {
        let parsed: OmSearchResponse =
            get_json_any_status(&self.http, GEOCODING, &self.geocoding_url, &[("name", city)])
                .await?;

        let place = parsed.into_place()?;
        debug!(found = place.is_some(), "geocoding finished");
        Ok(place)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoProvider {
    #[instrument(skip(self))]
    async fn current_weather(&self, at: Coordinates) -> Result<WeatherReport, ProviderError> {
        let latitude = at.latitude.to_string();
        let longitude = at.longitude.to_string();

        let parsed: OmForecastResponse = get_json(
            &self.http,
            FORECAST,
            &self.forecast_url,
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
                ("windspeed_unit", "ms"),
            ],
        )
        .await?;

        parsed.into_report()
    }
}
