//! World catalog for Spielleiter: locations, rooms, NPCs, and lore.
//!
//! This crate defines the immutable-per-session world snapshot the session
//! engine runs against. A [`Catalog`] is loaded once at startup from a
//! [`WorldProvider`] and never replaced; the only field that may change
//! afterwards is an NPC's dialogue options, replaced atomically through
//! [`Catalog::set_dialogue_options`].

/// The world catalog and identity resolution.
pub mod catalog;
/// Error types used throughout the crate.
pub mod error;
/// Locations and the rooms they contain.
pub mod location;
/// Lore entries referenced by NPC records.
pub mod lore;
/// NPC records, identifiers, and canned conversations.
pub mod npc;
/// The world data provider seam and a JSON-directory implementation.
pub mod provider;

/// Re-export catalog types.
pub use catalog::{Catalog, NpcRef};
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export location types.
pub use location::{Location, LocationId, Room, RoomFeatures};
/// Re-export lore types.
pub use lore::LoreEntry;
/// Re-export NPC types.
pub use npc::{NpcId, NpcRecord};
/// Re-export provider types.
pub use provider::{JsonDirProvider, WorldProvider};
