//! # Error Types
//!
//! Domain-specific error types for vesta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vesta-core errors (this file)                                         │
//! │  ├── CoreError        - Cart / tender / checkout rule violations       │
//! │  └── ValidationError  - Input validation failures (field-level)        │
//! │                                                                         │
//! │  vesta-client errors (separate crate)                                  │
//! │  └── ServiceError     - Collaborator call failures                     │
//! │                                                                         │
//! │  vesta-session errors (separate crate)                                 │
//! │  └── SessionError     - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → Frontend           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (index, amounts, field names)
//! 3. Errors are enum variants, never String
//! 4. Nothing in this crate panics on bad input

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations in the cart, the tender
/// dialog, or the submission gate. None of them are fatal: every one returns
/// the caller to an editable state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The addressed cart line does not exist.
    ///
    /// ## When This Occurs
    /// - A stale index arrives after another line was removed
    /// - The cart was cleared while an edit control was open
    #[error("Cart line {index} not found")]
    LineNotFound { index: usize },

    /// Cart has exceeded maximum allowed items.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// The cart is empty; there is nothing to submit.
    #[error("Cart is empty")]
    EmptyCart,

    /// The transaction total is zero or negative; submission is disabled.
    #[error("Transaction total must be positive, got {total_cents} cents")]
    NonPositiveTotal { total_cents: i64 },

    /// A submission is already in flight; the submit control is inert.
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// A tender operation arrived while no payment dialog is open.
    #[error("No payment dialog is open")]
    TenderNotOpen,

    /// The tender was already confirmed; it cannot be edited or re-confirmed.
    #[error("Tender already resolved")]
    TenderResolved,

    /// Payment amount violates the tender rules.
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Each variant names
/// the offending field so the frontend can surface an inline message next to
/// the right control, never a toast.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable amount, invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value exceeds an upper limit expressed in money.
    #[error("{field} cannot exceed {limit}")]
    ExceedsLimit { field: String, limit: String },
}

impl ValidationError {
    /// The field this error belongs to, for inline display.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::ExceedsLimit { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineNotFound { index: 3 };
        assert_eq!(err.to_string(), "Cart line 3 not found");

        let err = CoreError::NonPositiveTotal { total_cents: 0 };
        assert_eq!(
            err.to_string(),
            "Transaction total must be positive, got 0 cents"
        );
    }

    #[test]
    fn test_validation_error_field() {
        let err = ValidationError::Required {
            field: "paymentType".to_string(),
        };
        assert_eq!(err.field(), "paymentType");
        assert_eq!(err.to_string(), "paymentType is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
