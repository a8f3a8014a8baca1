//! Single entry point for place and weather data.
//!
//! Decides whether a request goes to the network provider or to the local
//! place store, and turns every network outcome into a [`Result`] value.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::{Result, WeatherError},
    model::{Place, Weather},
    provider::WeatherProvider,
    store::PlaceStore,
    task::{Delivery, fire},
};

#[derive(Debug)]
pub struct Repository {
    provider: Arc<dyn WeatherProvider>,
    places: PlaceStore,
}

impl Repository {
    pub fn new(provider: Arc<dyn WeatherProvider>, places: PlaceStore) -> Self {
        Self { provider, places }
    }

    /// Places matching `query`, in the order the API returned them.
    pub async fn search_places(&self, query: &str) -> Result<Vec<Place>> {
        debug!(query, "searching places");
        let response = self.provider.search_places(query).await.inspect_err(|e| {
            warn!(query, error = %e, "place search failed");
        })?;

        if response.is_ok() {
            Ok(response.places)
        } else {
            warn!(query, status = %response.status, "place search rejected");
            Err(WeatherError::Status(format!(
                "response status is {}",
                response.status
            )))
        }
    }

    /// Fetch realtime and daily weather concurrently and join them.
    ///
    /// Both legs always run to completion. Their statuses must both be "ok";
    /// otherwise the failure names both. A daily forecast whose sky and
    /// temperature lists differ in length is rejected.
    pub async fn refresh_weather(&self, lng: &str, lat: &str) -> Result<Weather> {
        debug!(lng, lat, "refreshing weather");

        let realtime = {
            let provider = Arc::clone(&self.provider);
            let (lng, lat) = (lng.to_owned(), lat.to_owned());
            fire(async move { provider.realtime_weather(&lng, &lat).await })
        };
        let daily = {
            let provider = Arc::clone(&self.provider);
            let (lng, lat) = (lng.to_owned(), lat.to_owned());
            fire(async move { provider.daily_weather(&lng, &lat).await })
        };

        let (realtime, daily) = tokio::join!(realtime, daily);
        let (realtime, daily) = match (realtime, daily) {
            (Ok(realtime), Ok(daily)) => (realtime, daily),
            (Err(e), _) | (_, Err(e)) => {
                warn!(lng, lat, error = %e, "weather refresh failed");
                return Err(e);
            }
        };

        let statuses = format!(
            "realtime response status is {}, daily response status is {}",
            realtime.status, daily.status
        );

        if !(realtime.is_ok() && daily.is_ok()) {
            warn!(lng, lat, %statuses, "weather refresh rejected");
            return Err(WeatherError::Status(statuses));
        }

        let (Some(realtime), Some(daily)) = (realtime.into_realtime(), daily.into_daily()) else {
            return Err(WeatherError::Status(format!("{statuses}, but result is missing")));
        };

        if !daily.is_aligned() {
            let (skies, temperatures) = (daily.sky_condition.len(), daily.temperature.len());
            warn!(lng, lat, skies, temperatures, "daily forecast is misaligned");
            return Err(WeatherError::Status(format!(
                "daily forecast has {skies} sky conditions but {temperatures} temperatures"
            )));
        }

        Ok(Weather { realtime, daily })
    }

    /// [`Repository::search_places`] as a spawned one-shot task.
    pub fn fire_search(self: &Arc<Self>, query: impl Into<String>) -> Delivery<Vec<Place>> {
        let repository = Arc::clone(self);
        let query = query.into();
        fire(async move { repository.search_places(&query).await })
    }

    /// [`Repository::refresh_weather`] as a spawned one-shot task.
    pub fn fire_refresh(
        self: &Arc<Self>,
        lng: impl Into<String>,
        lat: impl Into<String>,
    ) -> Delivery<Weather> {
        let repository = Arc::clone(self);
        let (lng, lat) = (lng.into(), lat.into());
        fire(async move { repository.refresh_weather(&lng, &lat).await })
    }

    pub fn save_place(&self, place: &Place) -> Result<()> {
        self.places.save(place)
    }

    pub fn saved_place(&self) -> Result<Place> {
        self.places.load()
    }

    pub fn is_place_saved(&self) -> bool {
        self.places.is_saved()
    }
}
