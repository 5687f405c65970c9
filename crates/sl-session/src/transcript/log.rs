//! Transcript storage and export.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::entry::{TranscriptEntry, TranscriptEvent};

/// An ordered, append-only log of scene events.
///
/// The empty transcript is the initial sentinel state; the first append
/// replaces it rather than concatenating onto anything. Entries are only
/// ever added at the end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_sequence: u64,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, assigning the next sequence number. Returns the
    /// assigned sequence.
    pub fn append(&mut self, event: TranscriptEvent) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(TranscriptEntry {
            sequence,
            timestamp: Utc::now(),
            event,
        });
        sequence
    }

    /// Read-only snapshot of all entries, oldest first.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript holds no entries yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the transcript as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Scene Transcript\n\n");
        for entry in &self.entries {
            match &entry.event {
                TranscriptEvent::PlayerAction { text } => {
                    out.push_str(&format!("**You**: {text}\n\n"));
                }
                TranscriptEvent::SceneNarration { text } => {
                    out.push_str(&format!("*{text}*\n\n"));
                }
                TranscriptEvent::NpcLine { speaker, line } => {
                    out.push_str(&format!("**{speaker}**: {line}\n\n"));
                }
                TranscriptEvent::Error { message } => {
                    out.push_str(&format!("> ⚠ {message}\n\n"));
                }
            }
        }
        out
    }

    /// Export the transcript as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Scene Transcript\n================\n\n");
        for entry in &self.entries {
            match &entry.event {
                TranscriptEvent::PlayerAction { text } => {
                    out.push_str(&format!("You: {text}\n"));
                }
                TranscriptEvent::SceneNarration { text } => {
                    out.push_str(&format!("[{text}]\n"));
                }
                TranscriptEvent::NpcLine { speaker, line } => {
                    out.push_str(&format!("{speaker}: {line}\n"));
                }
                TranscriptEvent::Error { message } => {
                    out.push_str(&format!("!! {message}\n"));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transcript() {
        let t = Transcript::new();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
    }

    #[test]
    fn sequences_are_monotonic() {
        let mut t = Transcript::new();
        let s0 = t.append(TranscriptEvent::PlayerAction {
            text: "Hello".to_string(),
        });
        let s1 = t.append(TranscriptEvent::NpcLine {
            speaker: "Gorim".to_string(),
            line: "Halt!".to_string(),
        });
        assert_eq!(s0, 0);
        assert_eq!(s1, 1);
        assert_eq!(t.entries()[1].sequence, 1);
    }

    #[test]
    fn entries_keep_append_order() {
        let mut t = Transcript::new();
        for i in 0..5 {
            t.append(TranscriptEvent::SceneNarration {
                text: format!("beat {i}"),
            });
        }
        let texts: Vec<&str> = t.entries().iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec!["beat 0", "beat 1", "beat 2", "beat 3", "beat 4"]);
    }

    #[test]
    fn export_markdown() {
        let mut t = Transcript::new();
        t.append(TranscriptEvent::PlayerAction {
            text: "Who goes there?".to_string(),
        });
        t.append(TranscriptEvent::NpcLine {
            speaker: "Gorim".to_string(),
            line: "Halt!".to_string(),
        });
        let md = t.export_markdown();
        assert!(md.contains("**You**: Who goes there?"));
        assert!(md.contains("**Gorim**: Halt!"));
    }

    #[test]
    fn export_text_with_error() {
        let mut t = Transcript::new();
        t.append(TranscriptEvent::Error {
            message: "generation failed: timeout".to_string(),
        });
        let txt = t.export_text();
        assert!(txt.contains("!! generation failed: timeout"));
    }

    #[test]
    fn serde_roundtrip() {
        let mut t = Transcript::new();
        t.append(TranscriptEvent::SceneNarration {
            text: "The gate creaks open.".to_string(),
        });
        let json = serde_json::to_string(&t).unwrap();
        let back: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.entries()[0].text(), "The gate creaks open.");
    }
}
