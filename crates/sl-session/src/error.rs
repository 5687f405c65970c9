//! Error types for the session engine.

use thiserror::Error;
use sl_world::WorldError;

use crate::backend::GenerationError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur during a scene session.
///
/// Everything after catalog initialization is scoped to the action that
/// triggered it; no variant here corrupts unrelated session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No room has been selected yet.
    #[error("no active scene: select a room first")]
    NoActiveScene,

    /// An action was rejected before any side effect: empty prompt,
    /// unresolvable target, or unknown canned label.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// The generation backend failed; a single error entry was appended to
    /// the transcript and the session remains usable.
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// World catalog error.
    #[error(transparent)]
    World(#[from] WorldError),
}

impl From<GenerationError> for SessionError {
    fn from(err: GenerationError) -> Self {
        Self::GenerationFailed(err.0)
    }
}
