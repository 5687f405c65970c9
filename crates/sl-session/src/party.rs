//! The party store: NPCs that travel with the player across rooms.

use sl_world::NpcId;

/// A player-controlled set of follower NPCs, alive for the session only.
///
/// Membership is keyed by stable id, not name, so it survives a
/// mid-session rename. Insertion order is preserved because the cast
/// resolver puts party members first in store order.
#[derive(Debug, Clone, Default)]
pub struct PartyStore {
    members: Vec<NpcId>,
}

impl PartyStore {
    /// Create an empty party.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire membership atomically.
    ///
    /// Duplicates are dropped, first occurrence wins. This never partially
    /// applies: the previous membership is discarded wholesale.
    pub fn set(&mut self, ids: impl IntoIterator<Item = NpcId>) {
        let mut members = Vec::new();
        for id in ids {
            if !members.contains(&id) {
                members.push(id);
            }
        }
        self.members = members;
    }

    /// Empty the membership.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Current members in insertion order.
    pub fn members(&self) -> &[NpcId] {
        &self.members
    }

    /// Whether the given NPC is a member.
    pub fn contains(&self, id: NpcId) -> bool {
        self.members.contains(&id)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the party is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_not_unions() {
        let a = NpcId::new();
        let b = NpcId::new();
        let c = NpcId::new();

        let mut party = PartyStore::new();
        party.set([a, b]);
        assert_eq!(party.len(), 2);

        party.set([c]);
        assert_eq!(party.members(), &[c]);
        assert!(!party.contains(a));
    }

    #[test]
    fn set_preserves_order_and_dedups() {
        let a = NpcId::new();
        let b = NpcId::new();

        let mut party = PartyStore::new();
        party.set([a, b, a]);
        assert_eq!(party.members(), &[a, b]);
    }

    #[test]
    fn clear_empties() {
        let mut party = PartyStore::new();
        party.set([NpcId::new()]);
        party.clear();
        assert!(party.is_empty());
    }
}
