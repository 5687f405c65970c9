//! Lore entries referenced by NPC records.

use serde::{Deserialize, Serialize};

/// A piece of background knowledge, keyed by a string id that NPC records
/// reference through their `lore_ids`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoreEntry {
    /// Identifier used by NPC records to reference this entry.
    pub lore_id: String,
    /// Short title.
    #[serde(default)]
    pub title: String,
    /// Body text, folded into generation context.
    #[serde(default)]
    pub content: String,
}

impl LoreEntry {
    /// Create a lore entry.
    pub fn new(
        lore_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            lore_id: lore_id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}
