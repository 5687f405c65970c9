//! Cast resolution: who is in the scene right now.

use sl_world::{Catalog, NpcRecord, Room};
use tracing::{debug, warn};

use crate::party::PartyStore;

/// One NPC in the resolved scene cast.
#[derive(Debug, Clone, Copy)]
pub struct CastMember<'a> {
    /// The NPC record, borrowed from the catalog.
    pub record: &'a NpcRecord,
    /// Whether this NPC is present as a party member rather than as a
    /// room native. A party member who is also room-native keeps the tag.
    pub is_party_member: bool,
}

/// The resolved, ordered, de-duplicated cast of the current scene.
///
/// A pure view over the catalog: it owns nothing and is recomputed on
/// demand rather than stored.
pub type SceneCast<'a> = Vec<CastMember<'a>>;

/// Compute the cast for a room given the current party.
///
/// Party members come first in store order, then room-native NPCs in room
/// order, with first occurrence winning on duplicates. Stale party ids and
/// unknown room NPC names are filtered, never errors. Pure and idempotent:
/// unchanged inputs yield an element-for-element identical sequence, which
/// re-rendering views rely on.
pub fn resolve_cast<'a>(catalog: &'a Catalog, room: &Room, party: &PartyStore) -> SceneCast<'a> {
    let mut cast: SceneCast<'a> = Vec::new();

    for id in party.members() {
        match catalog.npc_by_id(*id) {
            Some(record) => cast.push(CastMember {
                record,
                is_party_member: true,
            }),
            // NPC no longer in the catalog; membership is forgiving.
            None => debug!(%id, "dropping stale party member"),
        }
    }

    for name in &room.npc_names {
        let Some(record) = catalog.npc_by_name(name) else {
            warn!(npc = %name, room = %room.name, "room references unknown npc");
            continue;
        };
        if cast.iter().any(|m| m.record.id == record.id) {
            continue;
        }
        cast.push(CastMember {
            record,
            is_party_member: false,
        });
    }

    cast
}
