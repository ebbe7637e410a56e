//! # Service Error Types
//!
//! Error types for collaborator calls.
//!
//! Collaborator failures never corrupt local cart state: the session surfaces
//! them as transient notifications and leaves the cart editable. Nothing here
//! is retried automatically; a retry is a user-initiated re-submission.

use thiserror::Error;

/// Errors from the lookup and order-processing collaborators.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested entity does not exist on the backend.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The collaborator answered with a failure.
    #[error("Request failed: {message}")]
    RequestFailed { message: String },

    /// The collaborator is unreachable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The payload did not match the expected wire shape.
    #[error("Failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload decoded but violates a normalization rule.
    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },
}

impl ServiceError {
    /// Creates a not found error.
    pub fn not_found(entity: &str, id: &str) -> Self {
        ServiceError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Creates a request failure.
    pub fn request_failed(message: impl Into<String>) -> Self {
        ServiceError::RequestFailed {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ServiceError::not_found("Product", "p-1");
        assert_eq!(err.to_string(), "Product not found: p-1");

        let err = ServiceError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "Service unavailable: connection refused");
    }
}
