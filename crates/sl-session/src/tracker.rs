//! Introduction tracking, scoped to a room visit.

use std::collections::HashSet;

use sl_world::NpcId;

/// Remembers which NPCs have already been introduced during the current
/// room visit.
///
/// An introduction is shown the first time an NPC enters the active cast
/// within a visit and never again for that visit, no matter how often the
/// cast is recomputed. Changing rooms starts a fresh visit.
#[derive(Debug, Clone, Default)]
pub struct IntroductionTracker {
    introduced: HashSet<NpcId>,
}

impl IntroductionTracker {
    /// Create a tracker with no introductions shown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new room visit, forgetting every marker.
    pub fn reset(&mut self) {
        self.introduced.clear();
    }

    /// Mark an NPC as introduced. Returns true if this is the first time
    /// within the current visit.
    pub fn mark(&mut self, id: NpcId) -> bool {
        self.introduced.insert(id)
    }

    /// Forget a single NPC's marker so its introduction can play again
    /// within the same visit.
    pub fn forget(&mut self, id: NpcId) {
        self.introduced.remove(&id);
    }

    /// Whether an NPC has been introduced this visit.
    pub fn contains(&self, id: NpcId) -> bool {
        self.introduced.contains(&id)
    }
}
