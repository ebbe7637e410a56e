//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart that accumulates dozens of line edits in floats drifts away     │
//! │  from exact cent values.                                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is an i64 count of the smallest currency unit.          │
//! │    Rounding happens once per derivation, explicitly, half-up.           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vesta_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//!
//! // Parse user input at the presentation boundary
//! let tendered: Money = "200.00".parse().unwrap();
//! assert_eq!(tendered.cents(), 20000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Quantity, Rate};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values (change vs balance)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price_cents ──► LineItem.unit_price ──► LineItem.line_total   │
/// │                                                                         │
/// │  Cart.subtotal ──► discount ──► tax ──► total ──► Tender.paid/change   │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vesta_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Extends a unit price over a fractional quantity.
    ///
    /// ## Rounding
    /// Quantities are stored in hundredths (`2.50` = 250), so the raw product
    /// `cents × hundredths` is 100× too large. We divide back down with
    /// half-up rounding: `(cents * hundredths + 50) / 100`.
    ///
    /// ## Example
    /// ```rust
    /// use vesta_core::money::Money;
    /// use vesta_core::types::Quantity;
    ///
    /// let unit_price = Money::from_cents(299);      // $2.99
    /// let gross = unit_price.extend(Quantity::from_hundredths(250)); // × 2.5
    /// assert_eq!(gross.cents(), 748);               // $7.475 → $7.48
    /// ```
    pub fn extend(&self, quantity: Quantity) -> Money {
        // i128 intermediate prevents overflow on large amounts
        let raw = self.0 as i128 * quantity.hundredths() as i128;
        Money(div_round_half_up(raw, 100) as i64)
    }

    /// Computes a percentage of this amount, half-up rounded.
    ///
    /// `rate` is in basis points: 1800 = 18%. This single function backs both
    /// tax derivation and percentage-discount derivation.
    ///
    /// ## Example
    /// ```rust
    /// use vesta_core::money::Money;
    /// use vesta_core::types::Rate;
    ///
    /// let gross = Money::from_cents(20000);         // $200.00
    /// let tax = gross.percent_of(Rate::from_bps(1800)); // 18%
    /// assert_eq!(tax.cents(), 3600);                // $36.00
    /// ```
    pub fn percent_of(&self, rate: Rate) -> Money {
        let raw = self.0 as i128 * rate.bps() as i128;
        Money(div_round_half_up(raw, 10000) as i64)
    }

    /// Expresses this amount as a share of `base`, in basis points.
    ///
    /// Used for the weighted average tax rate of a cart:
    /// `tax.as_rate_of(subtotal)`. Returns `Rate::zero()` when `base` is not
    /// positive - the divide-by-zero guard for empty and free carts.
    pub fn as_rate_of(&self, base: Money) -> Rate {
        if base.0 <= 0 {
            return Rate::zero();
        }
        let raw = self.0 as i128 * 10000;
        Rate::from_bps(div_round_half_up(raw, base.0 as i128) as u32)
    }
}

/// Half-up division on i128 intermediates, sign-aware.
fn div_round_half_up(numerator: i128, divisor: i128) -> i128 {
    if numerator >= 0 {
        (numerator + divisor / 2) / divisor
    } else {
        (numerator - divisor / 2) / divisor
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money with exactly two decimal places.
///
/// ## Note
/// This is the presentation-boundary format ("150.00", "-5.50"). Currency
/// symbols are a frontend concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Parses a decimal string ("200", "199.9", "150.00") into cents.
///
/// At most two fractional digits are accepted; anything else is a field-level
/// validation error, never a panic.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: "must be a decimal number with at most 2 decimal places".to_string(),
        };

        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, s),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((maj, min)) => (maj, min),
            None => (digits, ""),
        };

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(invalid());
        }
        if minor_str.len() > 2 {
            return Err(invalid());
        }
        if !major_str.chars().all(|c| c.is_ascii_digit())
            || !minor_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| invalid())?
        };
        // "199.9" means 90 cents, not 9
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => minor_str.parse().map_err(|_| invalid())?,
        };

        Ok(Money(sign * (major * 100 + minor)))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (whole-unit quantities).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
