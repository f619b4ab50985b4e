//! One run: locate the city, then fetch weather and news side by side.

use tracing::{info, instrument};

use crate::{
    config::Settings,
    error::{BriefingError, ProviderError},
    model::{CityReport, Headlines, Place, WeatherReport},
    provider::{
        Geocoder, NewsSource, WeatherSource, gnews::GNewsProvider, openmeteo::OpenMeteoProvider,
    },
};

#[derive(Debug)]
pub enum BriefingOutcome {
    CityNotFound,
    Ready(CityReport),
}

/// Both results of the weather/news join. Neither side is dropped early.
#[derive(Debug)]
pub struct FanOut {
    pub weather: Result<WeatherReport, ProviderError>,
    pub news: Result<Headlines, ProviderError>,
}

impl FanOut {
    pub fn into_parts(self) -> Result<(WeatherReport, Headlines), BriefingError> {
        match (self.weather, self.news) {
            (Ok(weather), Ok(news)) => Ok((weather, news)),
            (Err(weather), Ok(_)) => Err(BriefingError::Weather(weather)),
            (Ok(_), Err(news)) => Err(BriefingError::News(news)),
            (Err(weather), Err(news)) => Err(BriefingError::Both { weather, news }),
        }
    }
}

#[derive(Debug)]
pub struct Briefing {
    geocoder: Box<dyn Geocoder>,
    weather: Box<dyn WeatherSource>,
    news: Box<dyn NewsSource>,
}

impl Briefing {
    pub fn new(
        geocoder: Box<dyn Geocoder>,
        weather: Box<dyn WeatherSource>,
        news: Box<dyn NewsSource>,
    ) -> Self {
        Self {
            geocoder,
            weather,
            news,
        }
    }

    /// Wire up the public Open-Meteo and GNews services.
    pub fn from_settings(settings: &Settings) -> Self {
        // Separate instances, so geocoding and forecast calls share no connection pool.
        let geocoder = OpenMeteoProvider::new(&settings.endpoints);
        let weather = OpenMeteoProvider::new(&settings.endpoints);
        let gnews = GNewsProvider::new(
            settings.news_api_key.clone(),
            settings.endpoints.news_url.clone(),
        );

        Self::new(Box::new(geocoder), Box::new(weather), Box::new(gnews))
    }

    pub async fn locate(&self, city: &str) -> Result<Option<Place>, BriefingError> {
        self.geocoder
            .locate(city)
            .await
            .map_err(BriefingError::Geocoding)
    }

    /// Fetch weather for `place` and news for `city` concurrently and wait for both.
    #[instrument(skip(self, place))]
    pub async fn gather(&self, city: &str, place: Place) -> Result<CityReport, BriefingError> {
        let (weather, news) = tokio::join!(
            self.weather.current_weather(place.coordinates),
            self.news.headlines(city),
        );

        let (weather, headlines) = FanOut { weather, news }.into_parts()?;
        info!(articles = headlines.articles().len(), "briefing ready");

        Ok(CityReport {
            city: city.to_string(),
            place,
            weather,
            headlines,
        })
    }

    pub async fn run(&self, city: &str) -> Result<BriefingOutcome, BriefingError> {
        match self.locate(city).await? {
            Some(place) => Ok(BriefingOutcome::Ready(self.gather(city, place).await?)),
            None => Ok(BriefingOutcome::CityNotFound),
        }
    }
}
