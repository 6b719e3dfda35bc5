//! Unified error handling for the studio stores.

use thiserror::Error;

use crate::persistence::PersistenceError;

/// Kind of entity a [`StudioError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Page,
    Section,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page => write!(f, "page"),
            Self::Section => write!(f, "section template"),
        }
    }
}

/// Error type for store commands.
///
/// Validation and conflict errors reject a command before anything changes.
/// Persistence errors leave the in-memory stores as they were before the
/// command.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Command input is missing or invalid.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Referenced page or template does not exist in the store.
    #[error("Not found: {kind} '{id}'")]
    NotFound { kind: EntityKind, id: String },

    /// Command would break a uniqueness rule (e.g. duplicate slug).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Persisting the change failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl StudioError {
    pub(crate) fn page_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind: EntityKind::Page,
            id: id.to_string(),
        }
    }

    pub(crate) fn section_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind: EntityKind::Section,
            id: id.to_string(),
        }
    }

    /// Returns `true` if the command was rejected because of its input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailed(_) | Self::Conflict(_))
    }
}

/// Result alias for studio commands.
pub type StudioResult<T> = Result<T, StudioError>;
