//! # Cart Module
//!
//! The mutable line-item list and the aggregate totals derived from it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Event                  Operation                Line State Change   │
//! │  ────────                  ─────────                ─────────────────   │
//! │                                                                         │
//! │  Tap Product ────────────► add_item() ────────────► lines.push(line)   │
//! │                                                                         │
//! │  Qty +/- (or hold) ──────► update_quantity() ─────► qty = max(0.01, n) │
//! │                                                                         │
//! │  Price override ─────────► update_price() ────────► unit_price = p     │
//! │                                                                         │
//! │  Discount edit ──────────► update_discount() ─────► clamp to [0,gross] │
//! │                                                                         │
//! │  VAT toggle ─────────────► remove_vat()/add_vat() ► tax zeroed/restored│
//! │                                                                         │
//! │  Remove / Clear ─────────► remove_item()/clear() ─► lines shrink       │
//! │                                                                         │
//! │  Every mutation is synchronous; totals() re-derives the aggregate      │
//! │  before the next paint. No code path sets a total directly.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tax Snapshot Rule
//! Line tax is captured when the product is added and rescaled when quantity
//! or unit price change. It is NOT re-derived when the discount changes: the
//! tax base stays the gross line amount.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{ProductRef, Quantity, Rate};
use crate::MAX_CART_LINES;

// =============================================================================
// Discount Mode
// =============================================================================

/// Which of the two discount views is authoritative.
///
/// The UI lets the cashier edit either a percentage or an absolute amount;
/// the caller reconciles the pair and tells the cart which one was edited
/// last. The cart stores both but never re-derives one from the other on a
/// discount edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMode {
    /// The percentage was edited last; the amount follows the gross.
    #[default]
    Percentage,
    /// The absolute amount was edited last; it only moves when re-clamped.
    Amount,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Design Notes
/// - `product`: frozen display snapshot (see [`ProductRef`])
/// - tax is a snapshot: `original_tax_bps` is retained so a removed VAT can
///   be restored exactly
/// - `line_total` is always derived, never stored
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Frozen product display snapshot.
    pub product: ProductRef,

    /// Quantity, minimum 0.01, no upper bound.
    pub quantity: Quantity,

    /// Unit price in cents; mutable via explicit override.
    pub unit_price_cents: i64,

    /// Discount rate in basis points (1000 = 10%).
    pub discount_bps: u32,

    /// Discount amount in cents; always within `[0, gross]`.
    pub discount_cents: i64,

    /// Which discount view was edited last.
    pub discount_mode: DiscountMode,

    /// Current tax rate in basis points; zero while VAT is removed.
    pub tax_bps: u32,

    /// Current tax amount in cents; zero while VAT is removed.
    pub tax_cents: i64,

    /// Tax rate captured at add time, kept so VAT removal can be undone.
    pub original_tax_bps: u32,

    /// Whether the cashier explicitly removed VAT from this line.
    pub vat_removed: bool,

    /// When this line was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a new line with the tax snapshot taken on the gross base.
    pub fn new(product: ProductRef, quantity: Quantity, unit_price: Money, tax_rate: Rate) -> Self {
        let mut line = LineItem {
            product,
            quantity,
            unit_price_cents: unit_price.cents(),
            discount_bps: 0,
            discount_cents: 0,
            discount_mode: DiscountMode::default(),
            tax_bps: tax_rate.bps(),
            tax_cents: 0,
            original_tax_bps: tax_rate.bps(),
            vat_removed: false,
            added_at: Utc::now(),
        };
        line.tax_cents = line.gross().percent_of(tax_rate).cents();
        line
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Gross line amount: `unit_price × quantity`, before discount and tax.
    #[inline]
    pub fn gross(&self) -> Money {
        self.unit_price().extend(self.quantity)
    }

    /// Derived line total: `gross − discount + tax`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.gross() - Money::from_cents(self.discount_cents) + Money::from_cents(self.tax_cents)
    }

    /// Re-derives the dependent amounts after a quantity or price change.
    ///
    /// - percentage-mode discount follows the new gross
    /// - amount-mode discount is re-clamped into `[0, gross]`
    /// - the tax snapshot is rescaled on the new gross base (unless VAT was
    ///   removed); the discount never feeds the tax base
    fn refresh(&mut self) {
        let gross = self.gross();
        self.discount_cents = match self.discount_mode {
            DiscountMode::Percentage => gross.percent_of(Rate::from_bps(self.discount_bps)).cents(),
            DiscountMode::Amount => self.discount_cents.clamp(0, gross.cents()),
        };
        if !self.vat_removed {
            self.tax_cents = gross.percent_of(Rate::from_bps(self.tax_bps)).cents();
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The mutable ordered list of line items.
///
/// ## Invariants
/// - Every discount satisfies `0 ≤ discount ≤ gross`
/// - `line_total == gross − discount + tax` for every line
/// - Maximum lines: [`MAX_CART_LINES`]
/// - Tapping the same product twice appends two lines; merging is a UI
///   affordance, not a cart rule
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Line items, in insertion order.
    pub lines: Vec<LineItem>,

    /// When the cart was created/last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Appends a new line item.
    ///
    /// ## Behavior
    /// - `quantity ≤ 0` is silently ignored (the UI clamps to 0.01; a zero
    ///   that slips through must not corrupt the cart)
    /// - a negative unit price is a validation error
    /// - a full cart is a business error
    pub fn add_item(
        &mut self,
        product: ProductRef,
        quantity: Quantity,
        unit_price: Money,
        tax_rate: Rate,
    ) -> CoreResult<()> {
        if quantity.is_zero_or_less() {
            return Ok(());
        }

        if unit_price.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "unitPrice".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines
            .push(LineItem::new(product, quantity, unit_price, tax_rate));
        Ok(())
    }

    /// Updates the quantity of a line, clamped to the 0.01 floor.
    pub fn update_quantity(&mut self, index: usize, quantity: Quantity) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        line.quantity = quantity.clamp_to_min();
        line.refresh();
        Ok(())
    }

    /// Steps a line's quantity up by one whole unit.
    pub fn increment_quantity(&mut self, index: usize) -> CoreResult<()> {
        let next = self.line(index)?.quantity.step_up();
        self.update_quantity(index, next)
    }

    /// Steps a line's quantity down by one whole unit, floored at 0.01.
    pub fn decrement_quantity(&mut self, index: usize) -> CoreResult<()> {
        let next = self.line(index)?.quantity.step_down();
        self.update_quantity(index, next)
    }

    /// Overrides the unit price of a line. Zero is allowed (free items).
    pub fn update_price(&mut self, index: usize, unit_price: Money) -> CoreResult<()> {
        if unit_price.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "unitPrice".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }
        let line = self.line_mut(index)?;
        line.unit_price_cents = unit_price.cents();
        line.refresh();
        Ok(())
    }

    /// Sets the discount of a line.
    ///
    /// The caller supplies both views already reconciled and names the one
    /// it edited; the cart clamps the amount into `[0, gross]` and does not
    /// re-derive either view from the other.
    pub fn update_discount(
        &mut self,
        index: usize,
        rate: Rate,
        amount: Money,
        mode: DiscountMode,
    ) -> CoreResult<()> {
        if rate.bps() > 10000 {
            return Err(ValidationError::OutOfRange {
                field: "discountPercentage".to_string(),
                min: 0,
                max: 100,
            }
            .into());
        }
        let line = self.line_mut(index)?;
        let gross = line.gross().cents();
        line.discount_bps = rate.bps();
        line.discount_cents = amount.cents().clamp(0, gross);
        line.discount_mode = mode;
        Ok(())
    }

    /// Removes VAT from a line, retaining the original rate for restore.
    pub fn remove_vat(&mut self, index: usize) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        line.tax_bps = 0;
        line.tax_cents = 0;
        line.vat_removed = true;
        Ok(())
    }

    /// Restores VAT on a line from the retained original rate.
    ///
    /// No-op when the line never carried tax.
    pub fn add_vat(&mut self, index: usize) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        if line.original_tax_bps == 0 {
            return Ok(());
        }
        line.tax_bps = line.original_tax_bps;
        line.tax_cents = line
            .gross()
            .percent_of(Rate::from_bps(line.original_tax_bps))
            .cents();
        line.vat_removed = false;
        Ok(())
    }

    /// Removes a line from the cart.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<()> {
        if index >= self.lines.len() {
            return Err(CoreError::LineNotFound { index });
        }
        self.lines.remove(index);
        Ok(())
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of lines in the cart.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Derives the aggregate totals. Pure function of the line list.
    pub fn totals(&self) -> CartTotals {
        let mut subtotal = Money::zero();
        let mut discount = Money::zero();
        let mut tax = Money::zero();

        for line in &self.lines {
            subtotal += line.gross();
            discount += Money::from_cents(line.discount_cents);
            tax += Money::from_cents(line.tax_cents);
        }

        CartTotals {
            subtotal_cents: subtotal.cents(),
            discount_cents: discount.cents(),
            tax_cents: tax.cents(),
            total_cents: (subtotal - discount + tax).cents(),
            tax_rate_bps: tax.as_rate_of(subtotal).bps(),
        }
    }

    fn line(&self, index: usize) -> CoreResult<&LineItem> {
        self.lines
            .get(index)
            .ok_or(CoreError::LineNotFound { index })
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut LineItem> {
        self.lines
            .get_mut(index)
            .ok_or(CoreError::LineNotFound { index })
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Aggregate totals, derived and never independently mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// `Σ gross_i`
    pub subtotal_cents: i64,
    /// `Σ discount_i`
    pub discount_cents: i64,
    /// `Σ tax_i`
    pub tax_cents: i64,
    /// `subtotal − discount + tax`
    pub total_cents: i64,
    /// Weighted average tax rate: `tax / subtotal`, 0 when subtotal is 0.
    pub tax_rate_bps: u32,
}

impl CartTotals {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
