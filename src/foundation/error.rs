/// Convenience result type used across framereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by recorder, surface and archive APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// A lifecycle operation was called in the wrong phase.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// `start` was called without a drawing callback.
    #[error("missing callback: {0}")]
    MissingCallback(String),

    /// An archive entry with this name already exists.
    #[error("duplicate archive entry: {0}")]
    DuplicateName(String),

    /// The archive has no entries to finalize.
    #[error("archive is empty")]
    EmptyArchive,

    /// The archive was already finalized and must be reset before reuse.
    #[error("archive already finalized")]
    ArchiveFinalized,

    /// Invalid user-provided option values.
    #[error("validation error: {0}")]
    Validation(String),

    /// The surface failed to produce image bytes.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The archive writer failed.
    #[error("archive error: {0}")]
    Archive(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build a [`ReelError::MissingCallback`] value.
    pub fn missing_callback(msg: impl Into<String>) -> Self {
        Self::MissingCallback(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Serialization`] value.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Build a [`ReelError::Archive`] value.
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }
}

impl From<zip::result::ZipError> for ReelError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Archive(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
