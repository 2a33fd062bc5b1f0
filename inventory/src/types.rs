//! Domain types for the event inventory.

use crate::error::InventoryError;
use serde::{Deserialize, Serialize};

/// Unique identifier for an event.
///
/// Derived from the creation timestamp in milliseconds and strictly
/// increasing within one process (see [`crate::ids::TimestampIdSource`]).
/// Immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Create an id from a millisecond timestamp.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// The underlying millisecond value.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable event.
///
/// Serialized field names match the persisted `events` layout
/// (`primaryImage`, `totalSlots`, `remainingSlots`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Unique identifier, immutable after creation.
    pub id: EventId,
    /// Event title.
    pub name: String,
    /// Event description.
    pub description: String,
    /// Event date, kept as the free-form text the form submitted.
    pub date: String,
    /// Primary image URL.
    pub primary_image: String,
    /// Ordered gallery image URLs; may be empty.
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Total slot capacity.
    pub total_slots: u32,
    /// Slots still available; `0 ≤ remaining_slots ≤ total_slots`.
    pub remaining_slots: u32,
}

impl EventRecord {
    /// Whether no slots remain.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.remaining_slots == 0
    }

    /// Shallow-merge `patch` into this record.
    ///
    /// Patching `total_slots` also resets `remaining_slots` to the new
    /// total; the admin edit form always resubmits capacity, and resetting
    /// reopens a sold-out event.
    pub fn apply_patch(&mut self, patch: &EventPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(date) = &patch.date {
            self.date.clone_from(date);
        }
        if let Some(primary_image) = &patch.primary_image {
            self.primary_image.clone_from(primary_image);
        }
        if let Some(gallery) = &patch.gallery {
            self.gallery.clone_from(gallery);
        }
        if let Some(total_slots) = patch.total_slots {
            self.total_slots = total_slots;
            self.remaining_slots = total_slots;
        }
    }
}

/// Input for creating an event.
///
/// All text fields are required; `gallery` defaults to empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Event title.
    pub name: String,
    /// Event description.
    pub description: String,
    /// Event date.
    pub date: String,
    /// Primary image URL.
    pub primary_image: String,
    /// Gallery image URLs.
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Slot capacity; must be positive.
    pub total_slots: u32,
}

/// Split a comma-separated gallery form input into URLs.
///
/// Entries are whitespace-trimmed and empties dropped, matching the admin
/// form handling.
#[must_use]
pub fn parse_gallery_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Partial update for an event; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    /// New title.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New date.
    pub date: Option<String>,
    /// New primary image URL.
    pub primary_image: Option<String>,
    /// New gallery.
    pub gallery: Option<Vec<String>>,
    /// New capacity; also resets `remaining_slots` to this value.
    pub total_slots: Option<u32>,
}

/// State of the event inventory.
///
/// The event list is an ordered sequence (creation order); persistence
/// round-trips preserve the order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryState {
    /// All events, in creation order.
    pub events: Vec<EventRecord>,
    /// Last operation failure, if any.
    pub last_error: Option<InventoryError>,
}

impl InventoryState {
    /// Create a new empty inventory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            last_error: None,
        }
    }

    /// Number of events.
    #[must_use]
    pub fn count(&self) -> usize {
        self.events.len()
    }

    /// Look up an event by id.
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&EventRecord> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: EventId) -> Option<&mut EventRecord> {
        self.events.iter_mut().find(|event| event.id == id)
    }

    /// Whether an event with `id` exists.
    #[must_use]
    pub fn exists(&self, id: EventId) -> bool {
        self.get(id).is_some()
    }
}
