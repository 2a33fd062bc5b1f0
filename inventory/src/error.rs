//! Error taxonomy for inventory operations.
//!
//! Failures never reach callers as `Err` values: reducers record them in
//! state and surface them as feedback actions, and the presentation layer
//! turns the `Display` text into user-facing messaging.

use crate::types::EventId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inventory operation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryError {
    /// Booking attempted against an event with no remaining slots.
    ///
    /// The display text is the user-facing notification.
    #[error("Sorry, no slots left!")]
    Exhausted {
        /// Event that is sold out.
        id: EventId,
    },

    /// Operation referenced an event that does not exist.
    #[error("event {id} not found")]
    NotFound {
        /// Missing event id.
        id: EventId,
    },

    /// Creation input failed validation.
    #[error("validation failed: {reason}")]
    Validation {
        /// What was rejected.
        reason: String,
    },

    /// The durable store failed; in-memory state is still authoritative.
    #[error("storage failure: {reason}")]
    Storage {
        /// Underlying storage error text.
        reason: String,
    },
}
