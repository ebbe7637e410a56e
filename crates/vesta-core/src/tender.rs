//! # Tender Module
//!
//! The payment/change calculator behind the payment dialog.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tender Lifecycle                                     │
//! │                                                                         │
//! │   open(total)                 confirm()                                 │
//! │  ────────────► AwaitingTender ──────────► Resolved                      │
//! │                │        ▲                                               │
//! │                │        │ validation failure                            │
//! │                └────────┘ (field-level error, dialog stays open)        │
//! │                                                                         │
//! │  • tendered amount defaults to the total SNAPSHOTTED at open time;     │
//! │    it does not track cart changes while the dialog is open - the       │
//! │    next open re-snapshots                                              │
//! │  • change = max(0, paid − total); balance = max(0, total − paid);      │
//! │    at most one of the two is non-zero                                  │
//! │  • acceptance: 0 < paid ≤ total × (1 + tolerance)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{PaymentType, Rate};
use crate::OVERPAYMENT_TOLERANCE_BPS;

// =============================================================================
// Change / Balance Arithmetic
// =============================================================================

/// Change due back: `max(0, paid − total)`.
#[inline]
pub fn change(paid: Money, total: Money) -> Money {
    (paid - total).max(Money::zero())
}

/// Outstanding balance: `max(0, total − paid)`.
#[inline]
pub fn balance(paid: Money, total: Money) -> Money {
    (total - paid).max(Money::zero())
}

// =============================================================================
// Default Payment Type Selection
// =============================================================================

/// Picks the default payment type from an already filtered + sorted list.
///
/// ## Policy
/// 1. First entry whose name or code contains "cash" (case-insensitive)
/// 2. Otherwise the first entry (the list arrives priority-sorted)
pub fn default_payment_type(types: &[PaymentType]) -> Option<&PaymentType> {
    types
        .iter()
        .find(|t| t.is_cash_like())
        .or_else(|| types.first())
}

// =============================================================================
// Tender Session
// =============================================================================

/// Dialog state: still collecting input, or confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TenderState {
    /// Collecting payment type and tendered amount.
    AwaitingTender,
    /// Confirmed; the receipt has been emitted.
    Resolved,
}

/// What a confirmed tender emits to the order-processing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TenderReceipt {
    pub payment_type_id: String,
    pub amount_cents: i64,
    pub change_cents: i64,
}

/// One open payment dialog.
///
/// The grand total is snapshotted at open time; a cart that changes while
/// the dialog is open is deliberately not re-read until the next open.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TenderSession {
    state: TenderState,

    /// Grand total snapshot at dialog-open time.
    total_cents: i64,

    /// Tendered amount; defaults to the total.
    paid_cents: i64,

    /// Selected payment type, if any.
    payment_type_id: Option<String>,

    /// Overpayment tolerance in basis points (1000 = 10%).
    tolerance_bps: u32,
}

impl TenderSession {
    /// Opens a dialog for `total`, defaulting the tendered amount to it and
    /// preselecting `default_type` when one is available.
    pub fn open(total: Money, default_type: Option<&PaymentType>) -> Self {
        Self::open_with_tolerance(total, default_type, Rate::from_bps(OVERPAYMENT_TOLERANCE_BPS))
    }

    /// Like [`TenderSession::open`] with an explicit tolerance.
    pub fn open_with_tolerance(
        total: Money,
        default_type: Option<&PaymentType>,
        tolerance: Rate,
    ) -> Self {
        TenderSession {
            state: TenderState::AwaitingTender,
            total_cents: total.cents(),
            paid_cents: total.cents(),
            payment_type_id: default_type.map(|t| t.id.clone()),
            tolerance_bps: tolerance.bps(),
        }
    }

    /// Current dialog state.
    #[inline]
    pub fn state(&self) -> TenderState {
        self.state
    }

    /// The total snapshot this dialog was opened with.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// The tendered amount as currently entered.
    #[inline]
    pub fn paid(&self) -> Money {
        Money::from_cents(self.paid_cents)
    }

    /// The selected payment type id, if any.
    #[inline]
    pub fn payment_type_id(&self) -> Option<&str> {
        self.payment_type_id.as_deref()
    }

    /// Change due at the current tendered amount.
    #[inline]
    pub fn change(&self) -> Money {
        change(self.paid(), self.total())
    }

    /// Outstanding balance at the current tendered amount.
    #[inline]
    pub fn balance(&self) -> Money {
        balance(self.paid(), self.total())
    }

    /// The inclusive acceptance ceiling: `total × (1 + tolerance)`.
    pub fn overpayment_limit(&self) -> Money {
        self.total() + self.total().percent_of(Rate::from_bps(self.tolerance_bps))
    }

    /// Replaces the tendered amount.
    pub fn set_amount(&mut self, amount: Money) -> CoreResult<()> {
        self.ensure_open()?;
        self.paid_cents = amount.cents();
        Ok(())
    }

    /// Parses and replaces the tendered amount from raw field input.
    ///
    /// Parse failures are field-level validation errors; the dialog stays
    /// open and the previous amount stands.
    pub fn set_amount_str(&mut self, input: &str) -> CoreResult<()> {
        self.ensure_open()?;
        let amount: Money = input.parse().map_err(CoreError::Validation)?;
        self.paid_cents = amount.cents();
        Ok(())
    }

    /// Selects a payment type.
    pub fn set_payment_type(&mut self, payment_type_id: impl Into<String>) -> CoreResult<()> {
        self.ensure_open()?;
        self.payment_type_id = Some(payment_type_id.into());
        Ok(())
    }

    /// Validates the current input without transitioning.
    ///
    /// ## Rules
    /// - payment type required
    /// - tendered amount positive
    /// - tendered amount within the overpayment limit (inclusive)
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.payment_type_id.is_none() {
            return Err(ValidationError::Required {
                field: "paymentType".to_string(),
            });
        }

        if self.paid_cents <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            });
        }

        let limit = self.overpayment_limit();
        if self.paid_cents > limit.cents() {
            return Err(ValidationError::ExceedsLimit {
                field: "amount".to_string(),
                limit: limit.to_string(),
            });
        }

        Ok(())
    }

    /// Confirms the tender, transitioning to Resolved.
    ///
    /// On validation failure the state stays AwaitingTender and the error
    /// names the offending field.
    pub fn confirm(&mut self) -> CoreResult<TenderReceipt> {
        self.ensure_open()?;
        self.validate().map_err(CoreError::Validation)?;

        self.state = TenderState::Resolved;
        Ok(TenderReceipt {
            // validate() guarantees the payment type is present
            payment_type_id: self.payment_type_id.clone().unwrap_or_default(),
            amount_cents: self.paid_cents,
            change_cents: self.change().cents(),
        })
    }

    fn ensure_open(&self) -> CoreResult<()> {
        match self.state {
            TenderState::AwaitingTender => Ok(()),
            TenderState::Resolved => Err(CoreError::TenderResolved),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn payment_type(id: &str, name: &str, code: &str, display_order: u32) -> PaymentType {
        PaymentType {
            id: id.to_string(),
            name: name.to_string(),
            code: code.to_string(),
            is_active: true,
            used_in_sales: true,
            used_in_debtor_payments: false,
            display_order,
        }
    }

    #[test]
    fn test_change_and_balance_mutually_exclusive() {
        let total = Money::from_cents(15000);

        let paid = Money::from_cents(20000);
        assert_eq!(change(paid, total).cents(), 5000);
        assert_eq!(balance(paid, total).cents(), 0);

        let paid = Money::from_cents(10000);
        assert_eq!(change(paid, total).cents(), 0);
        assert_eq!(balance(paid, total).cents(), 5000);

        let paid = total;
        assert_eq!(change(paid, total).cents(), 0);
        assert_eq!(balance(paid, total).cents(), 0);
    }

    #[test]
    fn test_default_payment_type_prefers_cash() {
        let types = vec![
            payment_type("1", "Card Terminal", "CARD", 1),
            payment_type("2", "Cash Drawer", "CSH", 2),
        ];
        assert_eq!(default_payment_type(&types).unwrap().id, "2");
    }

    #[test]
    fn test_default_payment_type_falls_back_to_first() {
        let types = vec![
            payment_type("1", "Card Terminal", "CARD", 1),
            payment_type("2", "Voucher", "VCH", 2),
        ];
        assert_eq!(default_payment_type(&types).unwrap().id, "1");
        assert!(default_payment_type(&[]).is_none());
    }

    #[test]
    fn test_open_defaults_amount_to_total() {
        let cash = payment_type("1", "Cash", "CSH", 1);
        let tender = TenderSession::open(Money::from_cents(15000), Some(&cash));

        assert_eq!(tender.state(), TenderState::AwaitingTender);
        assert_eq!(tender.paid().cents(), 15000);
        assert_eq!(tender.payment_type_id(), Some("1"));
        assert_eq!(tender.paid().to_string(), "150.00");
    }

    #[test]
    fn test_entering_amount_shows_change() {
        let cash = payment_type("1", "Cash", "CSH", 1);
        let mut tender = TenderSession::open(Money::from_cents(15000), Some(&cash));

        tender.set_amount_str("200").unwrap();
        assert_eq!(tender.change().to_string(), "50.00");
        assert_eq!(tender.balance().cents(), 0);
    }

    #[test]
    fn test_validate_requires_payment_type() {
        let mut tender = TenderSession::open(Money::from_cents(15000), None);
        tender.set_amount_str("150").unwrap();
        assert!(matches!(
            tender.validate(),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_amount_bounds() {
        let cash = payment_type("1", "Cash", "CSH", 1);
        let total = Money::from_cents(10000);
        let mut tender = TenderSession::open(total, Some(&cash));

        // exactly the total: accepted
        tender.set_amount(total).unwrap();
        assert!(tender.validate().is_ok());

        // exactly the tolerance ceiling: accepted
        tender.set_amount(Money::from_cents(11000)).unwrap();
        assert!(tender.validate().is_ok());

        // one cent past the ceiling: rejected
        tender.set_amount(Money::from_cents(11001)).unwrap();
        assert!(matches!(
            tender.validate(),
            Err(ValidationError::ExceedsLimit { .. })
        ));

        // zero and negative: rejected
        tender.set_amount(Money::zero()).unwrap();
        assert!(matches!(
            tender.validate(),
            Err(ValidationError::MustBePositive { .. })
        ));
        tender.set_amount(Money::from_cents(-100)).unwrap();
        assert!(tender.validate().is_err());
    }

    #[test]
    fn test_unparseable_amount_keeps_previous_value() {
        let cash = payment_type("1", "Cash", "CSH", 1);
        let mut tender = TenderSession::open(Money::from_cents(15000), Some(&cash));

        assert!(tender.set_amount_str("12.345").is_err());
        assert_eq!(tender.paid().cents(), 15000);
    }

    #[test]
    fn test_confirm_emits_receipt_and_resolves() {
        let cash = payment_type("1", "Cash", "CSH", 1);
        let mut tender = TenderSession::open(Money::from_cents(15000), Some(&cash));
        tender.set_amount_str("200").unwrap();

        let receipt = tender.confirm().unwrap();
        assert_eq!(receipt.payment_type_id, "1");
        assert_eq!(receipt.amount_cents, 20000);
        assert_eq!(receipt.change_cents, 5000);
        assert_eq!(tender.state(), TenderState::Resolved);

        // resolved dialogs are inert
        assert!(matches!(
            tender.set_amount_str("100"),
            Err(CoreError::TenderResolved)
        ));
        assert!(matches!(tender.confirm(), Err(CoreError::TenderResolved)));
    }

    #[test]
    fn test_failed_confirm_stays_open() {
        let mut tender = TenderSession::open(Money::from_cents(15000), None);
        assert!(tender.confirm().is_err());
        assert_eq!(tender.state(), TenderState::AwaitingTender);
    }

    #[test]
    fn test_overpayment_limit_rounding() {
        let cash = payment_type("1", "Cash", "CSH", 1);
        // total 99.99 → limit 109.99 (109.989 half-up)
        let tender = TenderSession::open(Money::from_cents(9999), Some(&cash));
        assert_eq!(tender.overpayment_limit().cents(), 10999);
    }
}
