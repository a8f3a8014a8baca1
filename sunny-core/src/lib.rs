//! Core library for the sunny weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather API client behind the [`WeatherProvider`] trait
//! - Local storage of the saved place
//! - The [`Repository`] that joins network and storage
//! - Per-screen view state with switch-to-latest delivery
//!
//! It is used by `sunny-cli`, but any other front end can drive the same view state.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod repository;
pub mod sky;
pub mod store;
pub mod task;
pub mod view_state;

pub use config::Config;
pub use error::{Result, WeatherError};
pub use model::{DailyForecast, Location, Place, RealtimeWeather, Weather};
pub use provider::{WeatherProvider, provider_from_config};
pub use repository::Repository;
pub use sky::Skycon;
pub use store::PlaceStore;
pub use view_state::{PlaceViewModel, Selection, WeatherViewModel};

use std::sync::Arc;

/// Build the repository the way a front end needs it: provider from `config`,
/// saved place under the configured data directory.
pub fn repository_from_config(config: &Config) -> anyhow::Result<Arc<Repository>> {
    let provider = provider_from_config(config)?;
    let places = PlaceStore::open(&config.data_dir()?)?;
    Ok(Arc::new(Repository::new(provider, places)))
}
