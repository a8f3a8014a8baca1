//! One-shot background work that always ends in a single [`Result`].

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::task::JoinHandle;

use crate::error::Result;

/// Outcome of a task started with [`fire`]. Resolves exactly once; a panic or
/// cancellation inside the task resolves to [`crate::WeatherError::Task`].
#[derive(Debug)]
#[must_use = "a delivery does nothing unless awaited"]
pub struct Delivery<T> {
    handle: JoinHandle<Result<T>>,
}

impl<T> Future for Delivery<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|joined| joined.unwrap_or_else(|e| Err(e.into())))
    }
}

/// Start `work` on the runtime right away and hand back its single outcome.
pub fn fire<T, F>(work: F) -> Delivery<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    Delivery {
        handle: tokio::spawn(work),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;

    #[tokio::test]
    async fn delivers_success() {
        let value = fire(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn delivers_failure_as_value() {
        let outcome: Result<()> = fire(async { Err(WeatherError::NotFound) }).await;
        assert!(matches!(outcome, Err(WeatherError::NotFound)));
    }

    #[tokio::test]
    async fn panic_becomes_task_error() {
        let outcome: Result<u8> = fire(async {
            let missing: Option<u8> = None;
            Ok(missing.expect("boom"))
        })
        .await;
        assert!(matches!(outcome, Err(WeatherError::Task(msg)) if msg.contains("panicked")));
    }

    #[tokio::test]
    async fn work_starts_before_await() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let delivery = fire(async move {
            let _ = tx.send(());
            Ok(())
        });

        rx.await.unwrap();
        delivery.await.unwrap();
    }
}
