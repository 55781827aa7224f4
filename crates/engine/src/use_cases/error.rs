//! Error type surfaced to the transport layer.

use cryptcrawl_domain::DomainError;

use crate::infrastructure::ports::RepoError;

/// Errors returned by the use cases.
///
/// Validation failures are detected before any storage access; storage
/// failures propagate unchanged from the backend. No operation swallows an
/// error to continue with stale or default data.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] RepoError),
}

impl EngineError {
    /// Whether this is a caller mistake (maps to an HTTP 4xx) rather than
    /// a storage failure (5xx).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
