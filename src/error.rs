//! Error taxonomy for discovery and match detection
//!
//! The core never retries. It returns one of these variants and the caller decides
//! whether to back off and try again ([`MatchError::is_retryable`]).

use thiserror::Error;

use crate::services::StoreError;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Debug, Error)]
pub enum MatchError {
    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Request is malformed or nonsensical (self-swipe, bad bounds)
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// Request collides with existing state (duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store timeout, unavailability or a lost optimistic write
    #[error("Transient failure: {0}")]
    Transient(String),

    /// A record the operation depends on vanished or is unreadable
    #[error("Inconsistent state: {0}")]
    Inconsistent(String),

    /// Caller abandoned the request before it finished
    #[error("Operation cancelled")]
    Cancelled,
}

impl MatchError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        MatchError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, MatchError::Transient(_) | MatchError::Cancelled)
    }

    /// Short reason that is safe to show to API clients
    pub fn public_reason(&self) -> &'static str {
        match self {
            MatchError::NotFound { .. } => "not found",
            MatchError::Invalid(_) => "invalid request",
            MatchError::Conflict(_) => "conflict",
            MatchError::Transient(_) | MatchError::Cancelled => "temporarily unavailable, retry later",
            MatchError::Inconsistent(_) => "internal error",
        }
    }
}

impl From<StoreError> for MatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => MatchError::Transient(msg),
            StoreError::StaleWrite { id } => {
                MatchError::Transient(format!("member {} was modified concurrently", id))
            }
            StoreError::Conflict(msg) => MatchError::Conflict(msg),
            StoreError::Missing { entity, id } => {
                MatchError::Inconsistent(format!("{} {} vanished mid-operation", entity, id))
            }
            StoreError::Corrupt(msg) => MatchError::Inconsistent(msg),
        }
    }
}
