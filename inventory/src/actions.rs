//! Inventory actions.
//!
//! This enum combines commands (requests to change the inventory) and
//! feedback events (results of the async effects those commands start).
//! Commands mutate state synchronously inside the reducer; feedback events
//! arrive after persistence settled and are what observers see broadcast.

use crate::error::InventoryError;
use crate::types::{EventDraft, EventId, EventPatch, EventRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All inputs to the inventory reducer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InventoryAction {
    // ========== Commands ==========
    /// Command: create a new event from an admin submission.
    CreateEvent {
        /// Validated-on-receipt creation input.
        draft: EventDraft,
    },

    /// Command: shallow-merge `patch` into the event with `id`.
    ///
    /// An absent id is a silent no-op, not an error.
    UpdateEvent {
        /// Target event.
        id: EventId,
        /// Fields to replace.
        patch: EventPatch,
    },

    /// Command: delete the event with `id`. Absent id is a silent no-op.
    DeleteEvent {
        /// Target event.
        id: EventId,
    },

    /// Command: book one slot.
    ///
    /// The slot check and decrement happen in one non-suspending step; the
    /// outcome comes back as [`InventoryAction::SlotBooked`] or
    /// [`InventoryAction::BookingRejected`] carrying the same correlation
    /// id, which distinguishes concurrent attempts.
    BookSlot {
        /// Correlates this attempt with its outcome.
        correlation_id: Uuid,
        /// Target event.
        id: EventId,
    },

    /// Command: hydrate the event list from the durable store.
    ///
    /// Dispatched once at process start; the store is never consulted
    /// again afterwards.
    LoadEvents,

    // ========== Feedback events ==========
    /// Event: creation persisted.
    EventCreated {
        /// The record as created.
        event: EventRecord,
    },

    /// Event: update persisted.
    EventUpdated {
        /// The record after the patch.
        event: EventRecord,
    },

    /// Event: deletion persisted.
    EventDeleted {
        /// Removed event id.
        id: EventId,
    },

    /// Event: booking succeeded and was persisted.
    SlotBooked {
        /// Correlation id of the originating attempt.
        correlation_id: Uuid,
        /// Booked event.
        id: EventId,
        /// Slots remaining after the booking.
        remaining_slots: u32,
    },

    /// Event: booking failed; nothing was mutated or persisted.
    BookingRejected {
        /// Correlation id of the originating attempt.
        correlation_id: Uuid,
        /// Why the booking failed (`Exhausted` or `NotFound`).
        error: InventoryError,
    },

    /// Event: hydration finished.
    EventsLoaded {
        /// The persisted list, or empty when no record existed.
        events: Vec<EventRecord>,
    },

    /// Event: an operation failed (validation or storage).
    OperationFailed {
        /// What went wrong.
        error: InventoryError,
    },
}

impl InventoryAction {
    /// Whether this action is a command.
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::CreateEvent { .. }
                | Self::UpdateEvent { .. }
                | Self::DeleteEvent { .. }
                | Self::BookSlot { .. }
                | Self::LoadEvents
        )
    }

    /// Whether this action is a feedback event.
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_and_events_partition_the_enum() {
        let command = InventoryAction::DeleteEvent {
            id: EventId::from_millis(1),
        };
        assert!(command.is_command());
        assert!(!command.is_event());

        let event = InventoryAction::EventDeleted {
            id: EventId::from_millis(1),
        };
        assert!(event.is_event());
        assert!(!event.is_command());
    }
}
