//! Scene session engine for Spielleiter.
//!
//! Tracks the active room, resolves the scene cast from party members and
//! room natives, routes player actions to a generation backend, and folds
//! the results back into the world catalog and an append-only transcript.
//! The engine is single-threaded and synchronous; the backend call is the
//! only operation expected to block, and the view layer drives re-renders
//! by polling [`SceneSession::revision`].

/// The generation backend seam: request/response types and the trait.
pub mod backend;
/// Cast resolution: who is in the scene right now.
pub mod cast;
/// Session configuration.
pub mod config;
/// Error types for the session engine.
pub mod error;
/// The party store.
pub mod party;
/// The scene session context object.
pub mod session;
/// Introduction tracking per room visit.
pub mod tracker;
/// The append-only transcript.
pub mod transcript;

/// Re-export backend seam types.
pub use backend::{
    ActionKind, DialogueLine, DialogueOptionDelta, GenerationBackend, GenerationError,
    GenerationRequest, GenerationResponse,
};
/// Re-export cast types.
pub use cast::{CastMember, SceneCast, resolve_cast};
/// Re-export configuration.
pub use config::SessionConfig;
/// Re-export error types.
pub use error::{SessionError, SessionResult};
/// Re-export the party store.
pub use party::PartyStore;
/// Re-export the session context.
pub use session::{ActiveScene, SceneSession};
/// Re-export transcript types.
pub use transcript::{Transcript, TranscriptEntry, TranscriptEvent};
