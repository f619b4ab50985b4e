use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// First geocoding hit for a city name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: Option<String>,
    pub country: Option<String>,
    pub coordinates: Coordinates,
}

/// Snapshot of current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature_c: f64,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
    pub weather_code: i32,
    /// Local time of the observation, as reported upstream.
    pub observed_at: Option<NaiveDateTime>,
}

impl WeatherReport {
    pub fn condition(&self) -> &'static str {
        crate::condition::describe(self.weather_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
}

/// Outcome of a news search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Headlines {
    /// Upstream returned an `articles` list; holds at most three entries in upstream order.
    Found(Vec<NewsArticle>),
    /// Upstream body carried no `articles` list at all.
    Missing,
}

impl Headlines {
    pub fn articles(&self) -> &[NewsArticle] {
        match self {
            Headlines::Found(articles) => articles,
            Headlines::Missing => &[],
        }
    }
}

/// Everything one run produces for a city that could be located.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityReport {
    /// City name exactly as the user entered it.
    pub city: String,
    pub place: Place,
    pub weather: WeatherReport,
    pub headlines: Headlines,
}
