//! NPC records and identifiers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved canned-conversation key holding an NPC's introduction line.
///
/// Entries under this key are hoisted into [`NpcRecord::introduction`]
/// when the catalog is built and are never offered as selectable prompts.
pub const INTRODUCTION_KEY: &str = "introduction";

/// Stable identifier for an NPC.
///
/// Used as an opaque tag by the party store so membership survives a
/// mid-session rename; everything else addresses NPCs by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NpcId(pub Uuid);

impl NpcId {
    /// Generate a new random NPC id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NpcId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A non-player character in the world catalog.
///
/// Owned by the catalog; `dialogue_options` is the only field permitted to
/// change after load, and only as a full replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcRecord {
    /// Stable id, generated when absent from source data.
    #[serde(default)]
    pub id: NpcId,
    /// Display name, unique within the catalog.
    pub name: String,
    /// Free-text description of the NPC.
    #[serde(default)]
    pub description: String,
    /// Selectable dialogue prompts. Replaced wholesale by generation
    /// results, never partially appended.
    #[serde(default)]
    pub dialogue_options: Vec<String>,
    /// Skill-check labels grouped by ability name.
    #[serde(default)]
    pub skill_checks: BTreeMap<String, Vec<String>>,
    /// Pre-authored dialogue lines by prompt label.
    #[serde(default)]
    pub canned_conversations: BTreeMap<String, String>,
    /// Fixed line shown the first time this NPC enters the cast
    /// within a room visit.
    #[serde(default)]
    pub introduction: Option<String>,
    /// What drives this NPC, folded into generation context.
    #[serde(default)]
    pub motivations: Vec<String>,
    /// Ids of lore entries relevant to this NPC.
    #[serde(default)]
    pub lore_ids: Vec<String>,
}

impl NpcRecord {
    /// Create an NPC record with a fresh id and empty fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NpcId::new(),
            name: name.into(),
            description: String::new(),
            dialogue_options: Vec::new(),
            skill_checks: BTreeMap::new(),
            canned_conversations: BTreeMap::new(),
            introduction: None,
            motivations: Vec::new(),
            lore_ids: Vec::new(),
        }
    }

    /// Hoist a reserved `introduction` canned-conversation entry into the
    /// dedicated field. Source data stores introductions inside the canned
    /// conversation map; an explicit `introduction` field wins over the
    /// map entry.
    pub(crate) fn normalize(&mut self) {
        if let Some(line) = self.canned_conversations.remove(INTRODUCTION_KEY)
            && self.introduction.is_none()
        {
            self.introduction = Some(line);
        }
    }

    /// Selectable canned-conversation labels, excluding the reserved
    /// introduction key.
    pub fn canned_labels(&self) -> impl Iterator<Item = &str> {
        self.canned_conversations
            .keys()
            .map(String::as_str)
            .filter(|k| *k != INTRODUCTION_KEY)
    }

    /// Look up a canned line by label. The reserved introduction key is
    /// never selectable.
    pub fn canned_line(&self, label: &str) -> Option<&str> {
        if label == INTRODUCTION_KEY {
            return None;
        }
        self.canned_conversations.get(label).map(String::as_str)
    }
}
