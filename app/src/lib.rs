//! Slotbook application wiring.
//!
//! Builds the two feature stores (session and inventory) over one shared
//! durable store, hydrates them from it at startup, and exposes the route
//! guard the presentation layer consults. State lives in the stores for the
//! life of the process; nothing is global.

pub mod routes;

use slotbook_auth::{AuthAction, AuthEnvironment, AuthReducer, AuthState};
use slotbook_core::environment::SystemClock;
use slotbook_inventory::{
    InventoryAction, InventoryEnvironment, InventoryReducer, InventoryState, TimestampIdSource,
};
use slotbook_runtime::{Store, StoreError};
use slotbook_storage::DurableStore;
use std::sync::Arc;
use std::time::Duration;

/// Store driving the session manager.
pub type AuthStore = Store<AuthState, AuthAction, AuthEnvironment, AuthReducer>;

/// Store driving the event inventory.
pub type InventoryStore =
    Store<InventoryState, InventoryAction, InventoryEnvironment, InventoryReducer>;

/// The wired application: one store per feature, one durable store behind
/// both.
pub struct App {
    /// Session manager store.
    pub auth: AuthStore,
    /// Event inventory store.
    pub inventory: InventoryStore,
}

impl App {
    /// Wire both features over `store` with the default broadcast capacity.
    #[must_use]
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self::with_broadcast_capacity(store, 16)
    }

    /// Wire both features with a custom action broadcast capacity.
    ///
    /// Raise the capacity when many booking requests wait on their outcome
    /// concurrently.
    #[must_use]
    pub fn with_broadcast_capacity(store: Arc<dyn DurableStore>, capacity: usize) -> Self {
        let ids = Arc::new(TimestampIdSource::new(Arc::new(SystemClock)));

        let auth = Store::with_broadcast_capacity(
            AuthState::new(),
            AuthReducer::new(),
            AuthEnvironment::new(Arc::clone(&store)),
            capacity,
        );

        let inventory = Store::with_broadcast_capacity(
            InventoryState::new(),
            InventoryReducer::new(),
            InventoryEnvironment::new(ids, store),
            capacity,
        );

        Self { auth, inventory }
    }

    /// Read the session and the event list from the durable store.
    ///
    /// Called once at process start; returns after both hydrations settled.
    /// The store is not consulted again afterwards.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if either store rejects the hydration
    /// action.
    #[tracing::instrument(skip(self), name = "app_hydrate")]
    pub async fn hydrate(&self) -> Result<(), StoreError> {
        let session = self.auth.send(AuthAction::LoadSession).await?;
        let events = self.inventory.send(InventoryAction::LoadEvents).await?;

        session.wait().await;
        events.wait().await;

        tracing::info!("hydration complete");
        Ok(())
    }

    /// Shut down both stores, waiting for pending effects.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if either store still has
    /// effects running when `timeout` expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.auth.shutdown(timeout).await?;
        self.inventory.shutdown(timeout).await
    }
}
