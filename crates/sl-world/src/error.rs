use thiserror::Error;

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur while loading or querying the world catalog.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The world data provider could not supply a complete catalog.
    /// Fatal at startup: no cast can be computed without a catalog.
    #[error("world data unavailable: {0}")]
    DataUnavailable(String),

    /// A reference could not be resolved to a catalog entry by either
    /// its stable id or its display name.
    #[error("not found in catalog: {0}")]
    NotFound(String),

    /// Two catalog entries share the same display name.
    #[error("duplicate name in catalog: \"{0}\"")]
    DuplicateName(String),

    /// Two catalog entries share the same stable id.
    #[error("duplicate id in catalog: {0}")]
    DuplicateId(String),
}
