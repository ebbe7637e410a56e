//! # Session Error Type
//!
//! Unified error type for session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vesta POS                              │
//! │                                                                         │
//! │  Frontend                    Session (Rust)                             │
//! │  ────────                    ──────────────                             │
//! │                                                                         │
//! │  confirmTender()                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session Operation                                               │  │
//! │  │  Result<T, SessionError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  ValidationError? ── field-level, inline next to the control ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  ServiceError? ───── transient notification, cart untouched ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  No error from this layer is fatal: a failed submission returns the    │
//! │  user to the editable cart, and nothing is retried automatically.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use vesta_client::ServiceError;
use vesta_core::{CoreError, ValidationError};

/// Error returned from session operations, ready for the frontend.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "amount cannot exceed 110.00",
///   "field": "amount"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// The form field this error belongs to, for inline display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error codes for session responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed (field-level)
    ValidationError,

    /// A collaborator call failed (transient notification)
    ServiceError,

    /// Cart operation failed
    CartError,

    /// Checkout gate refused the operation
    CheckoutError,

    /// Payment/tender error
    PaymentError,

    /// Anything else
    Internal,
}

impl SessionError {
    /// Creates a new session error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        SessionError {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        SessionError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a field-level validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError {
            code: ErrorCode::ValidationError,
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

/// Converts core errors to session errors.
impl From<CoreError> for SessionError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => SessionError::from(v),
            CoreError::LineNotFound { .. } | CoreError::CartTooLarge { .. } => {
                SessionError::new(ErrorCode::CartError, err.to_string())
            }
            CoreError::EmptyCart
            | CoreError::NonPositiveTotal { .. }
            | CoreError::SubmissionInFlight => {
                SessionError::new(ErrorCode::CheckoutError, err.to_string())
            }
            CoreError::TenderNotOpen
            | CoreError::TenderResolved
            | CoreError::InvalidPaymentAmount { .. } => {
                SessionError::new(ErrorCode::PaymentError, err.to_string())
            }
        }
    }
}

/// Validation errors keep their field so the frontend can render inline.
impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError {
            code: ErrorCode::ValidationError,
            field: Some(err.field().to_string()),
            message: err.to_string(),
        }
    }
}

/// Converts collaborator errors to session errors.
impl From<ServiceError> for SessionError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound { entity, id } => SessionError::not_found(&entity, &id),
            ServiceError::Decode(e) => {
                // Log the wire detail but keep the notification generic
                tracing::error!("Payload decode failed: {}", e);
                SessionError::new(ErrorCode::ServiceError, "Service returned an invalid payload")
            }
            other => SessionError::new(ErrorCode::ServiceError, other.to_string()),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for SessionError {}

// =============================================================================
// Unit Tests
// =============================================================================
