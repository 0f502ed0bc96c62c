//! Domain-specific error types and error handling.

use thiserror::Error;

/// Failures of the external token store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Token store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Token store call timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Malformed token row: {message}")]
    MalformedRow { message: String },
}

/// Failures of the validity cache
///
/// Never fatal to a lookup; the validator falls back to the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Token cache error: {message}")]
pub struct CacheError {
    pub message: String,
}

impl CacheError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of validating a bearer token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No bearer token supplied; the store is never queried
    #[error("Token missing")]
    MissingInput,

    /// No matching, live, unexpired row
    #[error("Token not found")]
    NotFound,

    /// The store could not answer (connection, timeout, malformed row)
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// Token exists but does not grant the required scopes
    #[error("Token does not grant the required scopes")]
    InsufficientScope,

    /// The row was deleted but its cache entry could not be fenced off
    #[error("Token deleted but its cache entry could not be cleared: {0}")]
    StaleCache(CacheError),
}

impl ValidationError {
    /// True for failures caused by infrastructure rather than the token itself
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            ValidationError::StoreUnavailable(_) | ValidationError::StaleCache(_)
        )
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
