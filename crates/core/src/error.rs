//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers deterministic failures only (bad field values, id collisions,
/// unknown ids). Persistence failures live in `stockroom-infra`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field value failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A record with the same id is already stored.
    #[error("a record with id '{0}' already exists")]
    DuplicateKey(String),

    /// The operation targets an id that is not stored.
    #[error("no record with id '{0}'")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate_key(id: impl Into<String>) -> Self {
        Self::DuplicateKey(id.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }
}
