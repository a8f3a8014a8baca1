use std::sync::Arc;

use parking_lot::Mutex;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    error::Result,
    model::Place,
    repository::Repository,
};

use super::{Observed, SwitchLatest};

/// State behind the place search screen.
#[derive(Debug)]
pub struct PlaceViewModel {
    repository: Arc<Repository>,
    query: Mutex<String>,
    /// Places currently on screen; survives the screen being rebuilt.
    place_list: Mutex<Vec<Place>>,
    results: SwitchLatest<Vec<Place>>,
}

impl PlaceViewModel {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self {
            repository,
            query: Mutex::new(String::new()),
            place_list: Mutex::new(Vec::new()),
            results: SwitchLatest::new(),
        }
    }

    /// Record a new query and start searching for it. Any earlier search
    /// still in flight becomes stale.
    pub fn search_places(&self, query: impl Into<String>) -> JoinHandle<bool> {
        let query = query.into();
        *self.query.lock() = query.clone();

        let repository = Arc::clone(&self.repository);
        self.results
            .submit(async move { repository.search_places(&query).await })
    }

    /// The query box was emptied: drop the list and ignore pending searches.
    pub fn clear_search(&self) {
        self.query.lock().clear();
        self.place_list.lock().clear();
        self.results.invalidate();
    }

    pub fn query(&self) -> String {
        self.query.lock().clone()
    }

    pub fn place_results(&self) -> watch::Receiver<Observed<Vec<Place>>> {
        self.results.subscribe()
    }

    pub fn latest_results(&self) -> Observed<Vec<Place>> {
        self.results.latest()
    }

    /// Copy a delivered outcome into the on-screen list. Returns `false` when
    /// the search failed and the list was emptied.
    pub fn apply_results(&self, outcome: &Result<Vec<Place>>) -> bool {
        let mut list = self.place_list.lock();
        list.clear();
        match outcome {
            Ok(places) => {
                list.extend(places.iter().cloned());
                true
            }
            Err(_) => false,
        }
    }

    pub fn place_list(&self) -> Vec<Place> {
        self.place_list.lock().clone()
    }

    pub fn save_place(&self, place: &Place) -> Result<()> {
        self.repository.save_place(place)
    }

    pub fn saved_place(&self) -> Result<Place> {
        self.repository.saved_place()
    }

    pub fn is_place_saved(&self) -> bool {
        self.repository.is_place_saved()
    }
}
