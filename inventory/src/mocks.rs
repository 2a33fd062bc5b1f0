//! Mock id sources for testing.

use crate::ids::IdSource;
use crate::types::EventId;
use std::sync::atomic::{AtomicI64, Ordering};

/// Id source producing 1, 2, 3, … for predictable test ids.
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    next: AtomicI64,
}

impl SequentialIdSource {
    /// Create a source whose first id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicI64::new(0),
        }
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&self) -> EventId {
        EventId::from_millis(self.next.fetch_add(1, Ordering::AcqRel) + 1)
    }
}
