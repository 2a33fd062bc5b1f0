//! Inventory environment.
//!
//! All external dependencies of the inventory reducer, injected as trait
//! objects so tests can substitute deterministic implementations.

use crate::ids::IdSource;
use slotbook_storage::DurableStore;
use std::sync::Arc;

/// Durable store key holding the persisted event list.
pub const EVENTS_KEY: &str = "events";

/// Dependencies of the inventory reducer.
#[derive(Clone)]
pub struct InventoryEnvironment {
    /// Source of fresh event ids.
    ///
    /// The id source owns the clock: ids are creation timestamps.
    pub ids: Arc<dyn IdSource>,

    /// Durable store mirroring the event list.
    pub store: Arc<dyn DurableStore>,
}

impl InventoryEnvironment {
    /// Create a new inventory environment.
    #[must_use]
    pub fn new(ids: Arc<dyn IdSource>, store: Arc<dyn DurableStore>) -> Self {
        Self { ids, store }
    }
}
