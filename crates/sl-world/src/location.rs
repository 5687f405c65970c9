//! Locations and the rooms they contain.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub Uuid);

impl LocationId {
    /// Generate a new random location id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Categorized points of interest within a room.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomFeatures {
    /// Traps and hazards.
    #[serde(default)]
    pub traps: Vec<String>,
    /// Treasure and valuables.
    #[serde(default)]
    pub treasure: Vec<String>,
    /// Doors and passages.
    #[serde(default)]
    pub doors: Vec<String>,
    /// Furniture and fixtures.
    #[serde(default)]
    pub furniture: Vec<String>,
    /// Anything that fits no other category.
    #[serde(default)]
    pub other: Vec<String>,
}

impl RoomFeatures {
    /// Whether no features are recorded at all.
    pub fn is_empty(&self) -> bool {
        self.traps.is_empty()
            && self.treasure.is_empty()
            && self.doors.is_empty()
            && self.furniture.is_empty()
            && self.other.is_empty()
    }
}

/// A room within a location.
///
/// Room identity is scoped to the parent location; the same room name may
/// occur in different locations without collision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room name, unique within its location.
    pub name: String,
    /// Narrative description shown when the room becomes active.
    #[serde(default)]
    pub description: String,
    /// Names of NPCs native to this room, in display order.
    #[serde(default)]
    pub npc_names: Vec<String>,
    /// Categorized room features.
    #[serde(default)]
    pub features: RoomFeatures,
}

impl Room {
    /// Create a room with the given name and no contents.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            npc_names: Vec::new(),
            features: RoomFeatures::default(),
        }
    }
}

/// A location in the world, holding an ordered sequence of rooms.
///
/// Immutable once loaded into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Stable id, generated when absent from source data.
    #[serde(default)]
    pub id: LocationId,
    /// Display name, unique within the catalog.
    pub name: String,
    /// Free-text description of the location.
    #[serde(default)]
    pub description: String,
    /// Rooms in display order.
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Location {
    /// Create a location with a fresh id and no rooms.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
            description: String::new(),
            rooms: Vec::new(),
        }
    }

    /// Find a room by name (case-insensitive).
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }
}
