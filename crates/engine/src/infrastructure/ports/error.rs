//! Error types for port operations.

/// Storage operation errors with context for debugging.
///
/// A failed read is always an error. Backends must never map a failure to
/// an empty collection - that would mask data loss as "no players yet".
/// Only true absence (missing file, no row) is a valid empty result.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The storage medium failed - includes operation name for tracing.
    #[error("storage unavailable in {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },

    /// A persisted record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create an Unavailable error with operation context.
    pub fn unavailable(operation: &'static str, message: impl ToString) -> Self {
        Self::Unavailable {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}
