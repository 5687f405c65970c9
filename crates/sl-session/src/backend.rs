//! The generation backend seam.
//!
//! The session engine treats generation as an opaque remote call: one
//! request scoped to the active location, room, and resolved cast, one
//! structured response folded back into catalog and transcript. Transport,
//! prompting, and timeouts belong to the implementor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of player action behind a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Free-text dialogue aimed at the targeted NPCs.
    FreeDialogue,
    /// A pre-authored dialogue option; never reaches the backend.
    CannedDialogue,
    /// A skill check against the room or its contents.
    SkillCheck,
}

/// Error returned by a generation backend.
///
/// Covers non-success status, transport failure, and malformed payloads
/// alike; the session surfaces all of them the same way.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct GenerationError(pub String);

/// A single outbound generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Active location name.
    pub location_name: String,
    /// Active room name.
    pub room_name: String,
    /// Active room description.
    pub room_description: String,
    /// Resolved target NPC names, order preserved.
    pub npc_names: Vec<String>,
    /// Assembled character profiles (description and motivations).
    pub npc_profiles: String,
    /// Assembled lore context for the targeted NPCs.
    pub lore: String,
    /// The player's prompt text.
    pub prompt_text: String,
    /// What kind of action this is.
    pub action_kind: ActionKind,
}

/// One spoken line in a generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Who speaks the line.
    pub speaker: String,
    /// The line itself.
    pub line: String,
}

/// A replacement set of dialogue options for one NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueOptionDelta {
    /// The NPC whose options are replaced.
    pub npc_name: String,
    /// The full new option list; options absent here disappear.
    pub options: Vec<String>,
}

/// The structured result of a generation call.
///
/// Field names on the wire follow the backend's JSON contract
/// (`dialogue`, `scene_changes`, `new_dialogue_options`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Narrated scene text, if any.
    #[serde(rename = "scene_changes", default)]
    pub scene_narration: Option<String>,
    /// Spoken lines in response order.
    #[serde(rename = "dialogue", default)]
    pub dialogue_lines: Vec<DialogueLine>,
    /// Replacement dialogue options for one NPC, if any.
    #[serde(rename = "new_dialogue_options", default)]
    pub dialogue_option_delta: Option<DialogueOptionDelta>,
}

impl GenerationResponse {
    /// Parse a backend payload.
    ///
    /// The backend is observed to wrap its JSON in markdown code fences;
    /// those are stripped before parsing. A payload that still fails to
    /// parse is a generation failure, not a crash.
    pub fn from_json_str(payload: &str) -> Result<Self, GenerationError> {
        let cleaned = strip_code_fence(payload);
        serde_json::from_str(cleaned)
            .map_err(|e| GenerationError(format!("malformed generation payload: {e}")))
    }
}

/// The remote generation collaborator.
///
/// The session issues exactly one call per dispatched action and applies
/// whatever arrives; there is no retry, cancellation, or version check.
pub trait GenerationBackend {
    /// Generate a scene response for the given request.
    fn generate(&mut self, request: &GenerationRequest)
    -> Result<GenerationResponse, GenerationError>;
}

/// Strip a surrounding markdown code fence (```` ```json ... ``` ````).
fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n'])
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_payload() {
        let response = GenerationResponse::from_json_str(
            r#"{
                "dialogue": [{"speaker": "Gorim", "line": "Halt!"}],
                "scene_changes": "The gate creaks open.",
                "new_dialogue_options": {"npc_name": "Gorim", "options": ["Ask about the gate"]}
            }"#,
        )
        .unwrap();
        assert_eq!(response.dialogue_lines.len(), 1);
        assert_eq!(response.scene_narration.as_deref(), Some("The gate creaks open."));
        assert_eq!(
            response.dialogue_option_delta.unwrap().npc_name,
            "Gorim"
        );
    }

    #[test]
    fn parse_fenced_payload() {
        let payload = "```json\n{\"dialogue\": [{\"speaker\": \"Gorim\", \"line\": \"Halt!\"}]}\n```";
        let response = GenerationResponse::from_json_str(payload).unwrap();
        assert_eq!(response.dialogue_lines[0].line, "Halt!");
        assert!(response.scene_narration.is_none());
    }

    #[test]
    fn parse_fence_without_language_tag() {
        let payload = "```\n{\"dialogue\": []}\n```";
        let response = GenerationResponse::from_json_str(payload).unwrap();
        assert!(response.dialogue_lines.is_empty());
    }

    #[test]
    fn malformed_payload_is_generation_error() {
        let result = GenerationResponse::from_json_str("not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn missing_fields_default() {
        let response = GenerationResponse::from_json_str("{}").unwrap();
        assert!(response.dialogue_lines.is_empty());
        assert!(response.scene_narration.is_none());
        assert!(response.dialogue_option_delta.is_none());
    }

    #[test]
    fn action_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ActionKind::SkillCheck).unwrap();
        assert_eq!(json, "\"skill_check\"");
    }
}
