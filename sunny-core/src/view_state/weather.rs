use std::sync::Arc;

use parking_lot::Mutex;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    model::{Place, Weather},
    repository::Repository,
};

use super::{Observed, SwitchLatest};

/// Which location the weather screen shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub lng: String,
    pub lat: String,
    pub place_name: String,
}

impl Selection {
    pub fn new(
        lng: impl Into<String>,
        lat: impl Into<String>,
        place_name: impl Into<String>,
    ) -> Self {
        Self {
            lng: lng.into(),
            lat: lat.into(),
            place_name: place_name.into(),
        }
    }
}

impl From<&Place> for Selection {
    fn from(place: &Place) -> Self {
        Self::new(&place.location.lng, &place.location.lat, &place.name)
    }
}

/// State behind the weather screen.
#[derive(Debug)]
pub struct WeatherViewModel {
    repository: Arc<Repository>,
    selection: Mutex<Selection>,
    weather: SwitchLatest<Weather>,
}

impl WeatherViewModel {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self {
            repository,
            selection: Mutex::new(Selection::default()),
            weather: SwitchLatest::new(),
        }
    }

    /// Fill only the fields that are still empty, so a rebuilt screen keeps
    /// whatever it already showed.
    pub fn restore(&self, initial: Selection) {
        let mut selection = self.selection.lock();
        if selection.lng.is_empty() {
            selection.lng = initial.lng;
        }
        if selection.lat.is_empty() {
            selection.lat = initial.lat;
        }
        if selection.place_name.is_empty() {
            selection.place_name = initial.place_name;
        }
    }

    /// Switch to another location. Call [`WeatherViewModel::refresh`] to load it.
    /// A refresh still in flight for the previous location is never published.
    pub fn select(&self, selection: Selection) {
        *self.selection.lock() = selection;
        self.weather.invalidate();
    }

    pub fn selection(&self) -> Selection {
        self.selection.lock().clone()
    }

    /// Reload weather for the current selection. An older refresh still in
    /// flight is discarded when it lands.
    pub fn refresh(&self) -> JoinHandle<bool> {
        let Selection { lng, lat, .. } = self.selection();
        let repository = Arc::clone(&self.repository);
        self.weather
            .submit(async move { repository.refresh_weather(&lng, &lat).await })
    }

    pub fn weather(&self) -> watch::Receiver<Observed<Weather>> {
        self.weather.subscribe()
    }

    pub fn latest_weather(&self) -> Observed<Weather> {
        self.weather.latest()
    }
}
