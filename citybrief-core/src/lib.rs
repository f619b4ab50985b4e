//! Core library for the `citybrief` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the geocoding, weather and news services
//! - The briefing run that ties them together
//! - Shared domain models
//!
//! It is used by `citybrief-cli`, but can also be reused by other binaries or services.

pub mod briefing;
pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use briefing::{Briefing, BriefingOutcome, FanOut};
pub use config::{Config, Endpoints, NewsConfig, Settings};
pub use error::{BriefingError, ConfigError, ProviderError};
pub use model::{CityReport, Coordinates, Headlines, NewsArticle, Place, WeatherReport};
pub use provider::{Geocoder, NewsSource, WeatherSource};
