//! The world catalog and identity resolution.
//!
//! The catalog is built once at session start and never replaced. It owns
//! all locations, NPC records, and lore entries, and reconciles the two
//! addressing schemes seen at its boundary: opaque stable ids and display
//! names. The display name (case-insensitive) is the canonical key; the
//! stable id is kept as an opaque tag so party membership survives a
//! mid-session rename.

use std::collections::HashMap;

use tracing::info;

use crate::error::{WorldError, WorldResult};
use crate::location::{Location, LocationId};
use crate::lore::LoreEntry;
use crate::npc::{NpcId, NpcRecord};
use crate::provider::WorldProvider;

/// A reference to an NPC in either addressing scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NpcRef {
    /// The NPC's stable id.
    Id(NpcId),
    /// The NPC's display name (case-insensitive).
    Name(String),
}

impl From<NpcId> for NpcRef {
    fn from(id: NpcId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for NpcRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// The immutable-per-session world snapshot.
#[derive(Debug, Clone)]
pub struct Catalog {
    locations: Vec<Location>,
    npcs: Vec<NpcRecord>,
    lore: Vec<LoreEntry>,

    // Indexes
    location_by_name_lower: HashMap<String, usize>,
    location_by_id: HashMap<LocationId, usize>,
    npc_by_name_lower: HashMap<String, usize>,
    npc_by_id: HashMap<NpcId, usize>,
    lore_by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already-loaded data.
    ///
    /// Validates name and id uniqueness and hoists reserved introduction
    /// entries out of each NPC's canned conversation map. Any violation is
    /// an error: the catalog is complete or it does not exist.
    pub fn new(
        locations: Vec<Location>,
        mut npcs: Vec<NpcRecord>,
        lore: Vec<LoreEntry>,
    ) -> WorldResult<Self> {
        let mut location_by_name_lower = HashMap::new();
        let mut location_by_id = HashMap::new();
        for (i, loc) in locations.iter().enumerate() {
            if location_by_name_lower
                .insert(loc.name.to_lowercase(), i)
                .is_some()
            {
                return Err(WorldError::DuplicateName(loc.name.clone()));
            }
            if location_by_id.insert(loc.id, i).is_some() {
                return Err(WorldError::DuplicateId(loc.id.to_string()));
            }
        }

        let mut npc_by_name_lower = HashMap::new();
        let mut npc_by_id = HashMap::new();
        for (i, npc) in npcs.iter().enumerate() {
            if npc_by_name_lower
                .insert(npc.name.to_lowercase(), i)
                .is_some()
            {
                return Err(WorldError::DuplicateName(npc.name.clone()));
            }
            if npc_by_id.insert(npc.id, i).is_some() {
                return Err(WorldError::DuplicateId(npc.id.to_string()));
            }
        }

        let mut lore_by_id = HashMap::new();
        for (i, entry) in lore.iter().enumerate() {
            if lore_by_id.insert(entry.lore_id.clone(), i).is_some() {
                return Err(WorldError::DuplicateId(entry.lore_id.clone()));
            }
        }

        for npc in &mut npcs {
            npc.normalize();
        }

        Ok(Self {
            locations,
            npcs,
            lore,
            location_by_name_lower,
            location_by_id,
            npc_by_name_lower,
            npc_by_id,
            lore_by_id,
        })
    }

    /// Load a complete catalog from a world data provider.
    ///
    /// Any provider failure aborts the load; there is no partial catalog.
    pub fn from_provider(provider: &dyn WorldProvider) -> WorldResult<Self> {
        let locations = provider.load_locations()?;
        let npcs = provider.load_npcs()?;
        let lore = provider.load_lore()?;
        info!(
            locations = locations.len(),
            npcs = npcs.len(),
            lore = lore.len(),
            "world catalog loaded"
        );
        Self::new(locations, npcs, lore)
    }

    // -----------------------------------------------------------------------
    // NPC resolution
    // -----------------------------------------------------------------------

    /// Resolve an NPC reference in either addressing scheme.
    pub fn resolve_npc(&self, npc_ref: &NpcRef) -> WorldResult<&NpcRecord> {
        match npc_ref {
            NpcRef::Id(id) => self
                .npc_by_id(*id)
                .ok_or_else(|| WorldError::NotFound(format!("npc id {id}"))),
            NpcRef::Name(name) => self
                .npc_by_name(name)
                .ok_or_else(|| WorldError::NotFound(format!("npc \"{name}\""))),
        }
    }

    /// Find an NPC by display name (case-insensitive).
    pub fn npc_by_name(&self, name: &str) -> Option<&NpcRecord> {
        self.npc_by_name_lower
            .get(&name.to_lowercase())
            .map(|i| &self.npcs[*i])
    }

    /// Find an NPC by stable id.
    pub fn npc_by_id(&self, id: NpcId) -> Option<&NpcRecord> {
        self.npc_by_id.get(&id).map(|i| &self.npcs[*i])
    }

    /// Replace an NPC's dialogue options wholesale.
    ///
    /// This is the only post-load mutation the catalog permits. The full
    /// sequence is swapped in one step so a concurrent re-render never
    /// observes a partially updated list.
    pub fn set_dialogue_options(
        &mut self,
        npc_ref: &NpcRef,
        options: Vec<String>,
    ) -> WorldResult<()> {
        let index = match npc_ref {
            NpcRef::Id(id) => self.npc_by_id.get(id).copied(),
            NpcRef::Name(name) => self.npc_by_name_lower.get(&name.to_lowercase()).copied(),
        };
        let index = index.ok_or_else(|| WorldError::NotFound(format!("npc {npc_ref:?}")))?;
        self.npcs[index].dialogue_options = options;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Location resolution
    // -----------------------------------------------------------------------

    /// Find a location by display name (case-insensitive).
    pub fn location_by_name(&self, name: &str) -> Option<&Location> {
        self.location_by_name_lower
            .get(&name.to_lowercase())
            .map(|i| &self.locations[*i])
    }

    /// Find a location by stable id.
    pub fn location_by_id(&self, id: LocationId) -> Option<&Location> {
        self.location_by_id.get(&id).map(|i| &self.locations[*i])
    }

    /// Resolve a location name or fail with `NotFound`.
    pub fn resolve_location(&self, name: &str) -> WorldResult<&Location> {
        self.location_by_name(name)
            .ok_or_else(|| WorldError::NotFound(format!("location \"{name}\"")))
    }

    // -----------------------------------------------------------------------
    // Lore
    // -----------------------------------------------------------------------

    /// Look up a lore entry by id.
    pub fn lore_entry(&self, lore_id: &str) -> Option<&LoreEntry> {
        self.lore_by_id.get(lore_id).map(|i| &self.lore[*i])
    }

    // -----------------------------------------------------------------------
    // Enumeration
    // -----------------------------------------------------------------------

    /// All locations in load order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All NPC records in load order.
    pub fn npcs(&self) -> &[NpcRecord] {
        &self.npcs
    }

    /// All lore entries in load order.
    pub fn lore(&self) -> &[LoreEntry] {
        &self.lore
    }

    /// Number of NPC records.
    pub fn npc_count(&self) -> usize {
        self.npcs.len()
    }

    /// Number of locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Room;

    fn test_catalog() -> Catalog {
        let mut citadel = Location::new("The Iron Citadel");
        let mut hall = Room::new("Great Hall");
        hall.npc_names.push("Gorim".to_string());
        citadel.rooms.push(hall);

        let mut gorim = NpcRecord::new("Gorim");
        gorim.description = "A dour dwarven guard.".to_string();
        gorim.lore_ids.push("founding".to_string());

        let lore = vec![LoreEntry::new(
            "founding",
            "The Founding",
            "The citadel was raised in a single winter.",
        )];

        Catalog::new(vec![citadel], vec![gorim], lore).unwrap()
    }

    #[test]
    fn resolve_by_name_case_insensitive() {
        let catalog = test_catalog();
        assert!(catalog.npc_by_name("gorim").is_some());
        assert!(catalog.npc_by_name("GORIM").is_some());
        assert!(catalog.npc_by_name("nobody").is_none());
    }

    #[test]
    fn resolve_by_either_scheme() {
        let catalog = test_catalog();
        let id = catalog.npc_by_name("Gorim").unwrap().id;

        let by_id = catalog.resolve_npc(&NpcRef::Id(id)).unwrap();
        let by_name = catalog.resolve_npc(&"Gorim".into()).unwrap();
        assert_eq!(by_id.id, by_name.id);
    }

    #[test]
    fn resolve_miss_is_not_found() {
        let catalog = test_catalog();
        let result = catalog.resolve_npc(&"Ghost".into());
        assert!(matches!(result, Err(WorldError::NotFound(_))));

        let result = catalog.resolve_npc(&NpcRef::Id(NpcId::new()));
        assert!(matches!(result, Err(WorldError::NotFound(_))));
    }

    #[test]
    fn duplicate_npc_name_rejected() {
        let result = Catalog::new(
            Vec::new(),
            vec![NpcRecord::new("Gorim"), NpcRecord::new("gorim")],
            Vec::new(),
        );
        assert!(matches!(result, Err(WorldError::DuplicateName(_))));
    }

    #[test]
    fn duplicate_location_name_rejected() {
        let result = Catalog::new(
            vec![Location::new("Citadel"), Location::new("citadel")],
            Vec::new(),
            Vec::new(),
        );
        assert!(matches!(result, Err(WorldError::DuplicateName(_))));
    }

    #[test]
    fn duplicate_lore_id_rejected() {
        let result = Catalog::new(
            Vec::new(),
            Vec::new(),
            vec![
                LoreEntry::new("founding", "A", ""),
                LoreEntry::new("founding", "B", ""),
            ],
        );
        assert!(matches!(result, Err(WorldError::DuplicateId(_))));
    }

    #[test]
    fn introduction_hoisted_at_build() {
        let mut npc = NpcRecord::new("Gorim");
        npc.canned_conversations
            .insert("introduction".to_string(), "Halt!".to_string());
        let catalog = Catalog::new(Vec::new(), vec![npc], Vec::new()).unwrap();

        let gorim = catalog.npc_by_name("Gorim").unwrap();
        assert_eq!(gorim.introduction.as_deref(), Some("Halt!"));
        assert!(gorim.canned_line("introduction").is_none());
    }

    #[test]
    fn set_dialogue_options_full_replace() {
        let mut catalog = test_catalog();
        catalog
            .set_dialogue_options(
                &"Gorim".into(),
                vec!["Who goes there?".to_string(), "State your business.".to_string()],
            )
            .unwrap();
        assert_eq!(catalog.npc_by_name("Gorim").unwrap().dialogue_options.len(), 2);

        // A later replacement discards everything from the previous one.
        catalog
            .set_dialogue_options(&"Gorim".into(), vec!["Leave.".to_string()])
            .unwrap();
        assert_eq!(
            catalog.npc_by_name("Gorim").unwrap().dialogue_options,
            vec!["Leave.".to_string()]
        );
    }

    #[test]
    fn set_dialogue_options_unknown_npc() {
        let mut catalog = test_catalog();
        let result = catalog.set_dialogue_options(&"Ghost".into(), Vec::new());
        assert!(matches!(result, Err(WorldError::NotFound(_))));
    }

    #[test]
    fn location_and_room_lookup() {
        let catalog = test_catalog();
        let citadel = catalog.resolve_location("the iron citadel").unwrap();
        assert!(citadel.room("Great Hall").is_some());
        assert!(catalog.resolve_location("Nowhere").is_err());
    }

    #[test]
    fn lore_lookup() {
        let catalog = test_catalog();
        assert!(catalog.lore_entry("founding").is_some());
        assert!(catalog.lore_entry("missing").is_none());
    }
}
