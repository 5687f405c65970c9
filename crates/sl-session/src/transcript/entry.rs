//! Transcript entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single scene event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptEvent {
    /// Something the player did or said, recorded before the backend is
    /// consulted so it is visible regardless of latency.
    PlayerAction {
        /// The player's input, verbatim.
        text: String,
    },
    /// Narrated scene text: room descriptions and generated scene changes.
    SceneNarration {
        /// The narration, trimmed of incidental surrounding whitespace.
        text: String,
    },
    /// A line spoken by an NPC.
    NpcLine {
        /// The speaking NPC's name.
        speaker: String,
        /// The spoken line.
        line: String,
    },
    /// A visible failure of the action that produced it. Earlier entries
    /// from the same action are never rolled back.
    Error {
        /// What went wrong.
        message: String,
    },
}

/// A sequenced, timestamped transcript entry.
///
/// Once appended an entry is never mutated or reordered; the sequence
/// number grows monotonically across the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Position in the transcript, monotonically increasing from 0.
    pub sequence: u64,
    /// When the entry was appended.
    pub timestamp: DateTime<Utc>,
    /// The event itself.
    pub event: TranscriptEvent,
}

impl TranscriptEntry {
    /// The entry's display text, whichever variant it is.
    pub fn text(&self) -> &str {
        match &self.event {
            TranscriptEvent::PlayerAction { text } => text,
            TranscriptEvent::SceneNarration { text } => text,
            TranscriptEvent::NpcLine { line, .. } => line,
            TranscriptEvent::Error { message } => message,
        }
    }

    /// The speaker, for NPC lines.
    pub fn speaker(&self) -> Option<&str> {
        match &self.event {
            TranscriptEvent::NpcLine { speaker, .. } => Some(speaker),
            _ => None,
        }
    }

    /// Whether this entry records a failed action.
    pub fn is_error(&self) -> bool {
        matches!(self.event, TranscriptEvent::Error { .. })
    }
}
