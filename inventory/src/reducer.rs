//! Reducer logic for the event inventory.
//!
//! Commands validate, mutate the in-memory list in place, and return a
//! persistence effect that writes the full list through to the durable
//! store and feeds the outcome back as an event. Feedback events are
//! idempotent: re-applying one (after its effect settled, or when replayed
//! by an observer) never double-mutates.

use crate::actions::InventoryAction;
use crate::environment::{InventoryEnvironment, EVENTS_KEY};
use crate::error::InventoryError;
use crate::types::{EventDraft, EventRecord, InventoryState};
use slotbook_core::{effect::Effect, reducer::Reducer, SmallVec};
use slotbook_storage::DurableStore;
use std::sync::Arc;

/// Reducer for the event inventory.
#[derive(Clone, Debug, Default)]
pub struct InventoryReducer;

impl InventoryReducer {
    /// Creates a new `InventoryReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates creation input.
    ///
    /// The admin form only enforces `required` attributes, so blank text
    /// fields and a zero capacity are rejected here.
    fn validate_draft(draft: &EventDraft) -> Result<(), InventoryError> {
        let required = [
            ("name", &draft.name),
            ("description", &draft.description),
            ("date", &draft.date),
            ("primaryImage", &draft.primary_image),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(InventoryError::Validation {
                    reason: format!("{field} is required"),
                });
            }
        }

        if draft.total_slots == 0 {
            return Err(InventoryError::Validation {
                reason: "totalSlots must be positive".to_owned(),
            });
        }

        Ok(())
    }

    /// Effect that writes the full event list through to the durable store,
    /// then feeds back `on_success` (or an `OperationFailed`).
    ///
    /// The snapshot is taken before the effect suspends, so later mutations
    /// cannot leak into this write; a newer mutation simply wins with its
    /// own, newer write (last writer wins).
    fn persist_then(
        store: &Arc<dyn DurableStore>,
        events: Vec<EventRecord>,
        on_success: InventoryAction,
    ) -> Effect<InventoryAction> {
        let store = Arc::clone(store);

        Effect::future(async move {
            let value = match serde_json::to_value(&events) {
                Ok(value) => value,
                Err(err) => {
                    tracing::error!(error = %err, "event list failed to encode");
                    return Some(InventoryAction::OperationFailed {
                        error: InventoryError::Storage {
                            reason: err.to_string(),
                        },
                    });
                },
            };

            match store.write_record(EVENTS_KEY, value).await {
                Ok(()) => Some(on_success),
                Err(err) => {
                    tracing::error!(error = %err, "event write-through failed");
                    Some(InventoryAction::OperationFailed {
                        error: InventoryError::Storage {
                            reason: err.to_string(),
                        },
                    })
                },
            }
        })
    }

    /// Effect that immediately feeds back `action` without touching storage.
    fn feedback(action: InventoryAction) -> Effect<InventoryAction> {
        Effect::future(async move { Some(action) })
    }

    /// Applies a feedback event to state. Idempotent.
    fn apply_event(state: &mut InventoryState, action: &InventoryAction) {
        match action {
            InventoryAction::EventCreated { event } => {
                if !state.exists(event.id) {
                    state.events.push(event.clone());
                }
                state.last_error = None;
            },
            InventoryAction::EventUpdated { event } => {
                if let Some(slot) = state.get_mut(event.id) {
                    *slot = event.clone();
                }
                state.last_error = None;
            },
            InventoryAction::EventDeleted { id } => {
                state.events.retain(|event| event.id != *id);
                state.last_error = None;
            },
            InventoryAction::SlotBooked {
                id,
                remaining_slots,
                ..
            } => {
                if let Some(event) = state.get_mut(*id) {
                    event.remaining_slots = *remaining_slots;
                }
                state.last_error = None;
            },
            InventoryAction::BookingRejected { error, .. }
            | InventoryAction::OperationFailed { error } => {
                state.last_error = Some(error.clone());
            },
            InventoryAction::EventsLoaded { events } => {
                state.events.clone_from(events);
                state.last_error = None;
            },
            // Commands are not applied here
            InventoryAction::CreateEvent { .. }
            | InventoryAction::UpdateEvent { .. }
            | InventoryAction::DeleteEvent { .. }
            | InventoryAction::BookSlot { .. }
            | InventoryAction::LoadEvents => {},
        }
    }
}

impl Reducer for InventoryReducer {
    type State = InventoryState;
    type Action = InventoryAction;
    type Environment = InventoryEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut effects = SmallVec::new();

        match action {
            // ========== Commands ==========
            InventoryAction::CreateEvent { draft } => {
                if let Err(error) = Self::validate_draft(&draft) {
                    let failed = InventoryAction::OperationFailed { error };
                    Self::apply_event(state, &failed);
                    effects.push(Self::feedback(failed));
                    return effects;
                }

                let event = EventRecord {
                    id: env.ids.next_id(),
                    name: draft.name,
                    description: draft.description,
                    date: draft.date,
                    primary_image: draft.primary_image,
                    gallery: draft.gallery,
                    total_slots: draft.total_slots,
                    remaining_slots: draft.total_slots,
                };

                state.events.push(event.clone());
                state.last_error = None;

                effects.push(Self::persist_then(
                    &env.store,
                    state.events.clone(),
                    InventoryAction::EventCreated { event },
                ));
            },

            InventoryAction::UpdateEvent { id, patch } => {
                // Absent id: silent no-op, nothing persisted
                let Some(event) = state.get_mut(id) else {
                    return effects;
                };

                event.apply_patch(&patch);
                let updated = event.clone();
                state.last_error = None;

                effects.push(Self::persist_then(
                    &env.store,
                    state.events.clone(),
                    InventoryAction::EventUpdated { event: updated },
                ));
            },

            InventoryAction::DeleteEvent { id } => {
                // Absent id: silent no-op, nothing persisted
                if !state.exists(id) {
                    return effects;
                }

                state.events.retain(|event| event.id != id);
                state.last_error = None;

                effects.push(Self::persist_then(
                    &env.store,
                    state.events.clone(),
                    InventoryAction::EventDeleted { id },
                ));
            },

            InventoryAction::BookSlot { correlation_id, id } => {
                // Validate-and-decrement as one non-suspending step. The
                // store runtime holds the state write lock for the whole
                // arm, so a concurrent attempt on the last slot runs after
                // this one committed and is rejected below.
                let error = match state.get_mut(id) {
                    Some(event) if event.remaining_slots > 0 => {
                        event.remaining_slots -= 1;
                        let remaining_slots = event.remaining_slots;
                        state.last_error = None;

                        effects.push(Self::persist_then(
                            &env.store,
                            state.events.clone(),
                            InventoryAction::SlotBooked {
                                correlation_id,
                                id,
                                remaining_slots,
                            },
                        ));
                        return effects;
                    },
                    Some(_) => InventoryError::Exhausted { id },
                    None => InventoryError::NotFound { id },
                };

                let rejected = InventoryAction::BookingRejected {
                    correlation_id,
                    error,
                };
                Self::apply_event(state, &rejected);
                effects.push(Self::feedback(rejected));
            },

            InventoryAction::LoadEvents => {
                let store = Arc::clone(&env.store);

                effects.push(Effect::future(async move {
                    match store.read_record(EVENTS_KEY).await {
                        Ok(Some(value)) => match serde_json::from_value(value) {
                            Ok(events) => Some(InventoryAction::EventsLoaded { events }),
                            Err(err) => {
                                // Corrupt record: start with an empty catalog
                                tracing::warn!(error = %err, "persisted events unreadable, starting empty");
                                Some(InventoryAction::EventsLoaded { events: Vec::new() })
                            },
                        },
                        Ok(None) => Some(InventoryAction::EventsLoaded { events: Vec::new() }),
                        Err(err) => {
                            tracing::error!(error = %err, "event hydration failed");
                            Some(InventoryAction::OperationFailed {
                                error: InventoryError::Storage {
                                    reason: err.to_string(),
                                },
                            })
                        },
                    }
                }));
            },

            // ========== Feedback events ==========
            event => Self::apply_event(state, &event),
        }

        effects
    }
}
