//! Scene session management.
//!
//! `SceneSession` is the explicit context object holding everything the
//! view layer interacts with: the world catalog, the party store, the
//! transcript, introduction markers, and the generation backend. All
//! operations are synchronous; the backend call inside [`SceneSession::dispatch`]
//! is the only one expected to block.

use tracing::{debug, warn};

use sl_world::{Catalog, Location, NpcId, NpcRef, Room};

use crate::backend::{ActionKind, GenerationBackend, GenerationRequest, GenerationResponse};
use crate::cast::{SceneCast, resolve_cast};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::party::PartyStore;
use crate::tracker::IntroductionTracker;
use crate::transcript::{Transcript, TranscriptEvent};

/// The currently selected location and room, stored with their canonical
/// catalog casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveScene {
    /// Canonical location name.
    pub location_name: String,
    /// Canonical room name.
    pub room_name: String,
}

/// An interactive scene session.
pub struct SceneSession<B: GenerationBackend> {
    catalog: Catalog,
    backend: B,
    config: SessionConfig,
    party: PartyStore,
    transcript: Transcript,
    introductions: IntroductionTracker,
    active: Option<ActiveScene>,
    revision: u64,
}

impl<B: GenerationBackend> SceneSession<B> {
    /// Create a session over a loaded catalog with default configuration.
    pub fn new(catalog: Catalog, backend: B) -> Self {
        Self::with_config(catalog, backend, SessionConfig::default())
    }

    /// Create a session with explicit configuration.
    pub fn with_config(catalog: Catalog, backend: B, config: SessionConfig) -> Self {
        Self {
            catalog,
            backend,
            config,
            party: PartyStore::new(),
            transcript: Transcript::new(),
            introductions: IntroductionTracker::new(),
            active: None,
            revision: 0,
        }
    }

    /// The world catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The transcript, oldest entry first.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The party store.
    pub fn party(&self) -> &PartyStore {
        &self.party
    }

    /// The currently active scene, if a room has been selected.
    pub fn active_scene(&self) -> Option<&ActiveScene> {
        self.active.as_ref()
    }

    /// A counter bumped on every state change. Views compare revisions to
    /// decide when to re-render instead of being called back directly.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // -----------------------------------------------------------------------
    // Scene selection
    // -----------------------------------------------------------------------

    /// Make a room the active scene.
    ///
    /// Fails with `NotFound` for an unknown location or room, leaving all
    /// state untouched. On success this starts a new room visit: the room
    /// description is narrated and due introductions are played.
    pub fn select_room(&mut self, location_name: &str, room_name: &str) -> SessionResult<()> {
        let location = self.catalog.resolve_location(location_name)?;
        let room = location.room(room_name).ok_or_else(|| {
            sl_world::WorldError::NotFound(format!(
                "room \"{room_name}\" in \"{}\"",
                location.name
            ))
        })?;

        let active = ActiveScene {
            location_name: location.name.clone(),
            room_name: room.name.clone(),
        };
        let description = room.description.trim().to_string();

        self.active = Some(active);
        self.introductions.reset();
        if !description.is_empty() {
            self.transcript
                .append(TranscriptEvent::SceneNarration { text: description });
        }
        self.emit_introductions();
        self.touch();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Party
    // -----------------------------------------------------------------------

    /// Replace the party membership atomically.
    ///
    /// Identities that do not resolve against the catalog are dropped with
    /// a warning and the rest are kept. Returns the number of members
    /// actually set. NPCs newly entering the active cast get their
    /// introduction played.
    pub fn set_party(&mut self, ids: impl IntoIterator<Item = NpcId>) -> usize {
        let mut resolved = Vec::new();
        for id in ids {
            if self.catalog.npc_by_id(id).is_some() {
                resolved.push(id);
            } else {
                warn!(%id, "dropping unresolvable party id");
            }
        }

        if self.config.reintroduce_on_rejoin {
            for id in &resolved {
                if !self.party.contains(*id) {
                    self.introductions.forget(*id);
                }
            }
        }

        self.party.set(resolved);
        let kept = self.party.len();
        self.emit_introductions();
        self.touch();
        kept
    }

    /// Empty the party.
    pub fn clear_party(&mut self) {
        self.party.clear();
        self.touch();
    }

    // -----------------------------------------------------------------------
    // Cast
    // -----------------------------------------------------------------------

    /// Resolve the cast of the active scene: party members first, then
    /// room natives, each NPC at most once.
    pub fn cast(&self) -> SessionResult<SceneCast<'_>> {
        let (_, room) = self.active_room()?;
        Ok(resolve_cast(&self.catalog, room, &self.party))
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Dispatch a player action to the generation backend and fold the
    /// response into catalog and transcript.
    ///
    /// Side effects happen in a fixed order: the player action is appended
    /// before the backend call so it is visible regardless of latency;
    /// then narration, NPC lines in response order, and finally the
    /// dialogue-option delta. A backend failure appends a single error
    /// entry and never rolls back the player action.
    pub fn dispatch(
        &mut self,
        kind: ActionKind,
        prompt: &str,
        target_names: &[String],
    ) -> SessionResult<()> {
        if kind == ActionKind::CannedDialogue {
            // Canned dialogue never reaches the backend; the prompt is the
            // canned label and the first target is the speaker.
            let npc_name = target_names.first().ok_or_else(|| {
                SessionError::InvalidAction("no target NPC for canned dialogue".to_string())
            })?;
            return self.canned(npc_name, prompt);
        }

        let active = self.active.clone().ok_or(SessionError::NoActiveScene)?;

        // All preconditions are checked before any transcript mutation.
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SessionError::InvalidAction(
                "prompt text is empty".to_string(),
            ));
        }
        if target_names.is_empty() {
            return Err(SessionError::InvalidAction(
                "no target NPCs".to_string(),
            ));
        }
        let mut npc_names = Vec::new();
        for name in target_names {
            let record = self.catalog.npc_by_name(name).ok_or_else(|| {
                SessionError::InvalidAction(format!("unresolvable target \"{name}\""))
            })?;
            npc_names.push(record.name.clone());
        }

        let request = self.build_request(&active, npc_names, prompt, kind)?;

        self.transcript.append(TranscriptEvent::PlayerAction {
            text: prompt.to_string(),
        });
        self.touch();

        debug!(
            location = %request.location_name,
            room = %request.room_name,
            targets = ?request.npc_names,
            kind = ?request.action_kind,
            "dispatching generation request"
        );

        match self.backend.generate(&request) {
            Ok(response) => {
                self.apply_response(response);
                self.touch();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "generation backend failed");
                self.transcript.append(TranscriptEvent::Error {
                    message: format!("generation failed: {err}"),
                });
                self.touch();
                Err(err.into())
            }
        }
    }

    /// Play a pre-authored conversation line.
    ///
    /// Never issues a backend call; appends exactly one NPC line. Unknown
    /// NPCs and labels are rejected before any transcript mutation.
    pub fn canned(&mut self, npc_name: &str, label: &str) -> SessionResult<()> {
        self.active.as_ref().ok_or(SessionError::NoActiveScene)?;

        let record = self.catalog.npc_by_name(npc_name).ok_or_else(|| {
            SessionError::InvalidAction(format!("unresolvable target \"{npc_name}\""))
        })?;
        let line = record
            .canned_line(label)
            .ok_or_else(|| {
                SessionError::InvalidAction(format!(
                    "no canned conversation \"{label}\" for {}",
                    record.name
                ))
            })?
            .to_string();
        let speaker = record.name.clone();

        self.transcript
            .append(TranscriptEvent::NpcLine { speaker, line });
        self.touch();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn active_room(&self) -> SessionResult<(&Location, &Room)> {
        let active = self.active.as_ref().ok_or(SessionError::NoActiveScene)?;
        let location = self
            .catalog
            .location_by_name(&active.location_name)
            .ok_or(SessionError::NoActiveScene)?;
        let room = location
            .room(&active.room_name)
            .ok_or(SessionError::NoActiveScene)?;
        Ok((location, room))
    }

    /// Play introductions for cast members not yet introduced this visit.
    fn emit_introductions(&mut self) {
        let Ok((_, room)) = self.active_room() else {
            return;
        };
        let due: Vec<(NpcId, String, String)> = resolve_cast(&self.catalog, room, &self.party)
            .iter()
            .filter(|m| !self.introductions.contains(m.record.id))
            .filter_map(|m| {
                m.record
                    .introduction
                    .as_ref()
                    .map(|line| (m.record.id, m.record.name.clone(), line.clone()))
            })
            .collect();

        for (id, speaker, line) in due {
            if self.introductions.mark(id) {
                self.transcript
                    .append(TranscriptEvent::NpcLine { speaker, line });
            }
        }
    }

    /// Assemble the outbound request from the active scene and the
    /// resolved targets: room context, character profiles, and the lore
    /// entries the targets reference.
    fn build_request(
        &self,
        active: &ActiveScene,
        npc_names: Vec<String>,
        prompt: &str,
        kind: ActionKind,
    ) -> SessionResult<GenerationRequest> {
        let (_, room) = self.active_room()?;

        let mut profiles = Vec::new();
        let mut lore_ids: Vec<&str> = Vec::new();
        for name in &npc_names {
            let record = self.catalog.resolve_npc(&name.as_str().into())?;
            let mut profile = format!("- **{}**: {}", record.name, record.description);
            if !record.motivations.is_empty() {
                profile.push_str(&format!(
                    "\n  - Motivation: {}",
                    record.motivations.join(", ")
                ));
            }
            profiles.push(profile);
            for id in &record.lore_ids {
                if !lore_ids.contains(&id.as_str()) {
                    lore_ids.push(id);
                }
            }
        }

        let lore_entries: Vec<String> = lore_ids
            .iter()
            .filter_map(|id| self.catalog.lore_entry(id))
            .map(|entry| format!("- {}: {}", entry.title, entry.content))
            .collect();
        let lore = if lore_entries.is_empty() {
            "No specific lore known.".to_string()
        } else {
            lore_entries.join("\n\n")
        };

        Ok(GenerationRequest {
            location_name: active.location_name.clone(),
            room_name: active.room_name.clone(),
            room_description: room.description.clone(),
            npc_names,
            npc_profiles: profiles.join("\n\n"),
            lore,
            prompt_text: prompt.to_string(),
            action_kind: kind,
        })
    }

    /// Fold a successful generation response into session state, in
    /// response order.
    fn apply_response(&mut self, response: GenerationResponse) {
        if let Some(narration) = response.scene_narration {
            // The backend is known to emit stray surrounding newlines.
            let trimmed = narration.trim();
            if !trimmed.is_empty() {
                self.transcript.append(TranscriptEvent::SceneNarration {
                    text: trimmed.to_string(),
                });
            }
        }

        for line in response.dialogue_lines {
            self.transcript.append(TranscriptEvent::NpcLine {
                speaker: line.speaker,
                line: line.line,
            });
        }

        if let Some(delta) = response.dialogue_option_delta {
            let npc_ref = NpcRef::Name(delta.npc_name.clone());
            if let Err(err) = self.catalog.set_dialogue_options(&npc_ref, delta.options) {
                // A delta for an unknown NPC is dropped, not fatal; the
                // rest of the response has already been applied.
                warn!(npc = %delta.npc_name, %err, "ignoring dialogue-option delta");
            }
        }
    }
}
