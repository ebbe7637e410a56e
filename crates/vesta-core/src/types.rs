//! # Domain Types
//!
//! Core domain types used throughout Vesta POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   PaymentType   │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  code (business)│   │  name / code    │   │  name           │       │
//! │  │  name           │   │  display_order  │   │  deposit_cents  │       │
//! │  │  price_cents    │   │  usage flags    │   │  loyalty_points │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Quantity     │   │      Rate       │   │  SalesProfile   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  hundredths     │   │  bps (u32)      │   │  Cash           │       │
//! │  │  250 = 2.50     │   │  825 = 8.25%    │   │  Credit         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for cross-references
//! - Business ID: (code, receipt_number, etc.) - human-readable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 825 bps = 8.25%, 1800 bps = 18% VAT
///
/// One type serves both tax rates and percentage discounts, so the same
/// integer arithmetic backs every percentage derivation in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// A line-item quantity in hundredths (two fixed decimal places).
///
/// ## Why Hundredths?
/// Quantities are fractional (1.5 kg, 0.25 m) with a floor of 0.01, so the
/// same integer-arithmetic discipline as [`Money`] applies: 250 = 2.50.
/// There is no upper bound; the floor is [`Quantity::MIN`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// The minimum sellable quantity: 0.01.
    pub const MIN: Quantity = Quantity(1);

    /// Creates a quantity from hundredths (250 = 2.50).
    #[inline]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Quantity(hundredths)
    }

    /// Creates a whole-unit quantity (3 = 3.00).
    #[inline]
    pub const fn from_whole(units: i64) -> Self {
        Quantity(units * 100)
    }

    /// Returns the quantity in hundredths.
    #[inline]
    pub const fn hundredths(&self) -> i64 {
        self.0
    }

    /// Checks whether the quantity is zero or negative (not sellable).
    #[inline]
    pub const fn is_zero_or_less(&self) -> bool {
        self.0 <= 0
    }

    /// Clamps the quantity up to the 0.01 floor.
    #[inline]
    pub fn clamp_to_min(self) -> Quantity {
        Quantity(self.0.max(Self::MIN.0))
    }

    /// One whole-unit step up.
    #[inline]
    pub fn step_up(self) -> Quantity {
        Quantity(self.0 + 100)
    }

    /// One whole-unit step down, floored at 0.01.
    #[inline]
    pub fn step_down(self) -> Quantity {
        Quantity((self.0 - 100).max(Self::MIN.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::from_whole(1)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale, as the catalog collaborator reports it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier shown on buttons and receipts.
    pub code: String,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Optional product image URL for the sell screen grid.
    pub image_url: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Tax rate in basis points (1800 = 18%).
    pub tax_rate_bps: u32,

    /// Whether product is active (soft delete).
    pub is_active: bool,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the tax rate.
    #[inline]
    pub fn tax_rate(&self) -> Rate {
        Rate::from_bps(self.tax_rate_bps)
    }
}

/// Display snapshot of a product held by a cart line.
///
/// The cart owns this copy; the full [`Product`] stays with the catalog
/// collaborator. Freezing the display fields keeps the cart stable even if
/// the catalog record changes while the sale is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    /// Product ID (UUID) for the order payload.
    pub id: String,
    /// Business code at time of adding (frozen).
    pub code: String,
    /// Product name at time of adding (frozen).
    pub name: String,
    /// Image URL at time of adding (frozen).
    pub image_url: Option<String>,
}

impl ProductRef {
    /// Snapshots the display fields of a product.
    pub fn from_product(product: &Product) -> Self {
        ProductRef {
            id: product.id.clone(),
            code: product.code.clone(),
            name: product.name.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

// =============================================================================
// Payment Type
// =============================================================================

/// A payment method the store accepts (cash, card terminal, voucher, ...).
///
/// The list arrives from the lookup collaborator already filtered to
/// `is_active && used_in_sales` and sorted by `display_order` ascending
/// (999 for unset); see `vesta-client`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentType {
    pub id: String,
    pub name: String,
    pub code: String,
    pub is_active: bool,
    /// Eligible for POS sales checkout.
    pub used_in_sales: bool,
    /// Eligible for debtor (credit account) payments.
    pub used_in_debtor_payments: bool,
    /// Ascending sort key; 999 when the backend left it unset.
    pub display_order: u32,
}

impl PaymentType {
    /// Whether this type looks like physical cash (name or code contains
    /// "cash", case-insensitive). Drives the default selection policy.
    pub fn is_cash_like(&self) -> bool {
        self.name.to_lowercase().contains("cash") || self.code.to_lowercase().contains("cash")
    }
}

// =============================================================================
// Customer & Sales Agent
// =============================================================================

/// A customer attached to the transaction.
///
/// Display and deposit/loyalty information only; attaching a customer never
/// changes pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// Prepaid deposit balance in cents, shown on the checkout panel.
    pub deposit_cents: i64,
    /// Loyalty points balance, shown on the checkout panel.
    pub loyalty_points: i64,
}

/// Staff attribution on a transaction. Does not affect pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesAgent {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Sales Profile
// =============================================================================

/// Whether a sale settles immediately (cash) or is invoiced (credit).
///
/// Drives the submission gate: cash sales with no payment entered open the
/// tender dialog first; credit sales submit directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SalesProfile {
    /// Settled at the counter; payment collected before submission.
    #[default]
    Cash,
    /// Invoiced to a debtor account; payment collected later.
    Credit,
}

impl std::fmt::Display for SalesProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SalesProfile::Cash => write!(f, "cash"),
            SalesProfile::Credit => write!(f, "credit"),
        }
    }
}

impl std::str::FromStr for SalesProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(SalesProfile::Cash),
            "credit" | "invoice" => Ok(SalesProfile::Credit),
            other => Err(format!(
                "Unknown sales profile: '{}'. Valid options: cash, credit",
                other
            )),
        }
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// A line of the assembled transaction, totals resolved.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    /// Business code at time of sale (frozen).
    pub code_snapshot: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    pub quantity: Quantity,
    pub unit_price_cents: i64,
    pub discount_cents: i64,
    pub tax_cents: i64,
    /// `gross − discount + tax`, resolved at assembly time.
    pub line_total_cents: i64,
}

/// The assembled transaction handed to the order-processing collaborator.
///
/// The core fills every field before handing it off and never inspects what
/// the collaborator does with it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Human-readable receipt number.
    pub receipt_number: String,
    pub profile: SalesProfile,
    pub lines: Vec<OrderLine>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    /// Selected payment type and tendered amount, when a payment was taken.
    pub payment: Option<OrderPayment>,
    pub customer_id: Option<String>,
    pub sales_agent_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Payment attached to an order draft.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayment {
    pub payment_type_id: String,
    /// Amount tendered in cents.
    pub amount_cents: i64,
    /// Change returned to the customer, when tendered exceeds the total.
    pub change_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_rate_from_percentage() {
        let rate = Rate::from_percentage(18.0);
        assert_eq!(rate.bps(), 1800);
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::from_hundredths(250).to_string(), "2.50");
        assert_eq!(Quantity::from_whole(3).to_string(), "3.00");
        assert_eq!(Quantity::MIN.to_string(), "0.01");
    }

    #[test]
    fn test_quantity_clamp_and_steps() {
        assert_eq!(Quantity::from_hundredths(0).clamp_to_min(), Quantity::MIN);
        assert_eq!(Quantity::from_hundredths(-50).clamp_to_min(), Quantity::MIN);
        assert_eq!(Quantity::from_whole(2).step_up(), Quantity::from_whole(3));
        // stepping below one whole unit floors at 0.01, never at zero
        assert_eq!(Quantity::from_whole(1).step_down(), Quantity::MIN);
        assert_eq!(Quantity::MIN.step_down(), Quantity::MIN);
    }

    #[test]
    fn test_payment_type_cash_like() {
        let cash = PaymentType {
            id: "1".into(),
            name: "Cash Drawer".into(),
            code: "CSH".into(),
            is_active: true,
            used_in_sales: true,
            used_in_debtor_payments: false,
            display_order: 1,
        };
        assert!(cash.is_cash_like());

        let card = PaymentType {
            id: "2".into(),
            name: "Card Terminal".into(),
            code: "CARD".into(),
            is_active: true,
            used_in_sales: true,
            used_in_debtor_payments: false,
            display_order: 2,
        };
        assert!(!card.is_cash_like());

        let by_code = PaymentType {
            code: "petty-cash".into(),
            ..card.clone()
        };
        assert!(by_code.is_cash_like());
    }

    #[test]
    fn test_sales_profile_parsing() {
        assert_eq!("cash".parse::<SalesProfile>().unwrap(), SalesProfile::Cash);
        assert_eq!(
            "credit".parse::<SalesProfile>().unwrap(),
            SalesProfile::Credit
        );
        assert_eq!(
            "invoice".parse::<SalesProfile>().unwrap(),
            SalesProfile::Credit
        );
        assert!("layaway".parse::<SalesProfile>().is_err());
    }

    #[test]
    fn test_sales_profile_default() {
        assert_eq!(SalesProfile::default(), SalesProfile::Cash);
    }
}
