//! Domain errors for the spy cat agency.

use thiserror::Error;

/// Coarse classification of a [`DomainError`], used by outer layers to pick a
/// response without inspecting individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced entity does not exist.
    NotFound,
    /// A business rule or input constraint was violated.
    Validation,
    /// Storage or upstream failure.
    Internal,
}

/// Domain-level errors that can occur in the agency.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("cat not found: {0}")]
    CatNotFound(i64),

    #[error("mission not found: {0}")]
    MissionNotFound(i64),

    #[error("target not found: {0}")]
    TargetNotFound(i64),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("concurrency conflict: {entity} {id} was modified")]
    ConcurrencyConflict { entity: &'static str, id: i64 },

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Shorthand for a business rule violation.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CatNotFound(_) | Self::MissionNotFound(_) | Self::TargetNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::ValidationFailed(_) | Self::ConcurrencyConflict { .. } => ErrorKind::Validation,
            Self::UpstreamUnavailable(_) | Self::DatabaseError(_) | Self::SerializationError(_) => {
                ErrorKind::Internal
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}
