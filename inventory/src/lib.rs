//! Event Inventory Manager.
//!
//! Owns the canonical in-memory list of bookable events and exposes the
//! create / update / delete / book operations over it. The durable store is
//! a passive mirror: every successful mutation writes the entire event list
//! back under the `events` key, and the store is read exactly once, at
//! startup, via [`InventoryAction::LoadEvents`].
//!
//! ## Booking atomicity
//!
//! The slot check and decrement happen in one non-suspending step inside
//! [`InventoryReducer::reduce`], which the store runtime only calls while
//! holding the state write lock. Two near-simultaneous bookings against the
//! last slot therefore cannot both observe `remaining_slots > 0`: the
//! second attempt runs after the first committed and is rejected. Simulated
//! latency lives in the persistence effect, after the commit.

pub mod actions;
pub mod environment;
pub mod error;
pub mod ids;
pub mod reducer;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod mocks;

pub use actions::InventoryAction;
pub use environment::{InventoryEnvironment, EVENTS_KEY};
pub use error::InventoryError;
pub use ids::{IdSource, TimestampIdSource};
pub use reducer::InventoryReducer;
pub use types::{
    parse_gallery_input, EventDraft, EventId, EventPatch, EventRecord, InventoryState,
};
