//! # Validation Module
//!
//! Input validation utilities for Vesta POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (SPA form controls)                                 │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Session operation (Rust)                                     │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend collaborators                                        │
//! │  └── Their own constraints (out of scope here)                         │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation failures are always field-level errors corrected locally;
//! nothing here throws or aborts a transaction.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Quantity;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be at least 0.01 (the UI clamps; a raw value from a text field
///   may still arrive below the floor)
/// - No upper bound
pub fn validate_quantity(qty: Quantity) -> ValidationResult<()> {
    if qty < Quantity::MIN {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "unitPrice".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "discountPercentage".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a payment amount.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Cannot pay zero or negative amounts
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query for the lookup collaborators.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be non-empty
/// - Must parse as a UUID
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::MIN).is_ok());
        assert!(validate_quantity(Quantity::from_whole(999_999)).is_ok());

        assert!(validate_quantity(Quantity::from_hundredths(0)).is_err());
        assert!(validate_quantity(Quantity::from_hundredths(-1)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
        assert!(validate_unit_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_discount_bps() {
        assert!(validate_discount_bps(0).is_ok());
        assert!(validate_discount_bps(1000).is_ok());
        assert!(validate_discount_bps(10000).is_ok());
        assert!(validate_discount_bps(10001).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(Money::from_cents(1)).is_ok());
        assert!(validate_payment_amount(Money::zero()).is_err());
        assert!(validate_payment_amount(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  coke  ").unwrap(), "coke");
        assert!(validate_search_query("").is_ok());
        assert!(validate_search_query(&"a".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
