//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Backing store failure; aborts the whole operation
    #[error("Repository error: {0}")]
    Repository(String),

    /// Request is well-formed but cannot be served as asked
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Repository(_))
    }

    /// Whether a check-in was rejected for being too far from the place
    pub const fn is_too_far_from_place(&self) -> bool {
        matches!(self, Self::Domain(err) if err.is_too_far())
    }
}
