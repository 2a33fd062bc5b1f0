//! Session environment.

use slotbook_storage::DurableStore;
use std::sync::Arc;

/// Durable store key holding the persisted session.
pub const ACTIVE_USER_KEY: &str = "activeUser";

/// Dependencies of the session reducer.
#[derive(Clone)]
pub struct AuthEnvironment {
    /// Durable store mirroring the active session.
    pub store: Arc<dyn DurableStore>,
}

impl AuthEnvironment {
    /// Create a new session environment.
    #[must_use]
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }
}
