//! Error types for taskflow-core.

use std::fmt;

use thiserror::Error;

/// Result alias used by every fallible registry and entity operation.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// The kind of entity an id refers to; carried by [`RegistryError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Task,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Project => write!(f, "project"),
            EntityKind::Task => write!(f, "task"),
            EntityKind::User => write!(f, "user"),
        }
    }
}

/// All errors that can arise from registry operations.
///
/// Both variants are recoverable: the caller re-prompts or reports them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A referenced id does not resolve to an existing entity.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u64 },

    /// Malformed input reached the core (empty required field, unknown status,
    /// forbidden status transition).
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
}

impl RegistryError {
    pub fn not_found(kind: EntityKind, id: impl Into<u64>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// `true` for [`RegistryError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Rejects empty or whitespace-only required strings.
pub(crate) fn require_present(field: &'static str, value: &str) -> RegistryResult<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::validation(field, "must not be empty"));
    }
    Ok(())
}
