//! Error types for authorization checks
//!
//! Denial of an ability query is not an error; those calls return
//! `Ok(false)`. The error variants here cover the two route-check failure
//! modes and infrastructure failures propagated from the store.

use thiserror::Error;
use warden_store::StoreError;

/// Authorization error types.
#[derive(Debug, Error)]
pub enum GuardError {
    /// No resolvable current user
    #[error("No authenticated user")]
    Unauthenticated,

    /// A matching permission exists but is administratively closed.
    ///
    /// Deliberately indistinguishable from a route that does not exist.
    #[error("Resource not found")]
    ResourceHidden,

    /// Store failure during graph traversal
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for authorization checks.
pub type GuardResult<T> = Result<T, GuardError>;

impl GuardError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            GuardError::Unauthenticated => 401,
            GuardError::ResourceHidden => 404,
            GuardError::Store(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            GuardError::Unauthenticated => "UNAUTHENTICATED",
            GuardError::ResourceHidden => "NOT_FOUND",
            GuardError::Store(_) => "STORE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_codes() {
        assert_eq!(GuardError::Unauthenticated.status_code(), 401);
        assert_eq!(GuardError::ResourceHidden.status_code(), 404);
        let store_err = GuardError::from(StoreError::UnknownUser(Uuid::now_v7()));
        assert_eq!(store_err.status_code(), 500);
    }

    #[test]
    fn test_hidden_resource_reads_as_not_found() {
        // The message must not reveal that the route exists.
        assert_eq!(GuardError::ResourceHidden.to_string(), "Resource not found");
        assert_eq!(GuardError::ResourceHidden.error_code(), "NOT_FOUND");
    }
}
