//! Simulated network latency decorator.

use crate::{DurableStore, StorageFuture};
use rand::Rng;
use serde_json::Value;
use std::time::Duration;

/// Decorator that delays every store operation by a jittered interval.
///
/// Stands in for network latency: each operation sleeps for
/// `base × U(1.0, 1.5)` before delegating. The wrapper sits below the
/// reducers, so the delay lands inside persistence effects, after the
/// in-memory mutation committed, and cannot reopen the
/// check-then-decrement window.
#[derive(Debug, Clone)]
pub struct SimulatedLatency<S> {
    inner: S,
    base: Duration,
}

impl<S> SimulatedLatency<S> {
    /// Wrap `inner` with the default one second base delay.
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            base: Duration::from_secs(1),
        }
    }

    /// Set the base delay. The effective delay is `base × U(1.0, 1.5)`.
    #[must_use]
    pub const fn with_base_delay(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }

    /// Unwrap the decorated store.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn jittered(&self) -> Duration {
        let factor = rand::thread_rng().gen_range(1.0..=1.5);
        self.base.mul_f64(factor)
    }
}

impl<S: DurableStore> DurableStore for SimulatedLatency<S> {
    fn read_record<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<Value>> {
        let delay = self.jittered();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            self.inner.read_record(key).await
        })
    }

    fn write_record<'a>(&'a self, key: &'a str, value: Value) -> StorageFuture<'a, ()> {
        let delay = self.jittered();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            self.inner.write_record(key, value).await
        })
    }

    fn remove_record<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        let delay = self.jittered();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            self.inner.remove_record(key).await
        })
    }
}
