//! Unified error type for the domain layer.

use thiserror::Error;

/// Errors raised by domain validation and value-object construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Level outside the playable range. Carries the raw value so callers
    /// can echo it back to the client.
    #[error("invalid level: {0} (levels are numbered 1 through 4)")]
    InvalidLevel(i64),

    /// Validation failed (e.g., pseudo or message out of bounds).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
