//! Per-screen state holders between the repository and the presentation layer.
//!
//! Results are published on a [`watch`] channel. Each new request bumps a
//! generation counter; an outcome is only published if its generation is
//! still the latest, so a slow stale request never overwrites a newer one.

use std::{future::Future, sync::Arc};

use parking_lot::Mutex;
use tokio::{sync::watch, task::JoinHandle};
use tracing::debug;

use crate::{error::Result, task::fire};

pub mod place;
pub mod weather;

pub use place::PlaceViewModel;
pub use weather::{Selection, WeatherViewModel};

/// Notice shown when a place search fails.
pub const NO_PLACES_NOTICE: &str = "no places found";
/// Notice shown when a weather refresh fails.
pub const WEATHER_FAILED_NOTICE: &str = "could not fetch weather";

/// Latest published outcome; `None` until the first request completes.
pub type Observed<T> = Option<Arc<Result<T>>>;

/// Switch-to-latest runner: only the outcome of the newest submission is published.
#[derive(Debug)]
pub struct SwitchLatest<T> {
    generation: Arc<Mutex<u64>>,
    tx: Arc<watch::Sender<Observed<T>>>,
}

impl<T: Send + Sync + 'static> Default for SwitchLatest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> SwitchLatest<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            generation: Arc::new(Mutex::new(0)),
            tx: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Observed<T>> {
        self.tx.subscribe()
    }

    pub fn latest(&self) -> Observed<T> {
        self.tx.borrow().clone()
    }

    /// Make every in-flight submission stale without starting a new one.
    pub fn invalidate(&self) -> u64 {
        let mut generation = self.generation.lock();
        *generation += 1;
        *generation
    }

    /// Run `work` in the background. The handle yields `true` if its outcome
    /// was published and `false` if a newer submission superseded it.
    pub fn submit<F>(&self, work: F) -> JoinHandle<bool>
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let submitted = self.invalidate();
        let current = Arc::clone(&self.generation);
        let tx = Arc::clone(&self.tx);
        let delivery = fire(work);

        tokio::spawn(async move {
            let outcome = delivery.await;

            // Hold the lock while publishing so a newer submit cannot slip in between.
            let generation = current.lock();
            if *generation != submitted {
                debug!(submitted, latest = *generation, "dropping stale result");
                return false;
            }
            tx.send_replace(Some(Arc::new(outcome)));
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;
    use std::time::Duration;

    #[tokio::test]
    async fn publishes_single_submission() {
        let switch = SwitchLatest::<u32>::new();
        let mut rx = switch.subscribe();

        assert!(switch.submit(async { Ok(5) }).await.unwrap());

        rx.changed().await.unwrap();
        let latest = rx.borrow().clone().unwrap();
        assert!(matches!(&*latest, Ok(5)));
    }

    #[tokio::test]
    async fn stale_result_is_dropped() {
        let switch = SwitchLatest::<&'static str>::new();

        let slow = switch.submit(async {
            tokio::time::sleep(Duration::from_millis(150)).await;
            Ok("old")
        });
        let fast = switch.submit(async { Ok("new") });

        assert!(fast.await.unwrap());
        assert!(!slow.await.unwrap());

        let latest = switch.latest().unwrap();
        assert!(matches!(&*latest, Ok(v) if *v == "new"));
    }

    #[tokio::test]
    async fn invalidate_drops_in_flight_result() {
        let switch = SwitchLatest::<u8>::new();

        let pending = switch.submit(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(1)
        });
        switch.invalidate();

        assert!(!pending.await.unwrap());
        assert!(switch.latest().is_none());
    }

    #[tokio::test]
    async fn failures_are_published_too() {
        let switch = SwitchLatest::<u8>::new();

        assert!(switch.submit(async { Err(WeatherError::NotFound) }).await.unwrap());

        let latest = switch.latest().unwrap();
        assert!(matches!(&*latest, Err(WeatherError::NotFound)));
    }
}
