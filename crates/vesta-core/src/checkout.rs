//! # Checkout Module
//!
//! The transaction submission gate.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Submission Gate                                      │
//! │                                                                         │
//! │            begin() [cash, no payment]                                   │
//! │  ┌──────┐ ───────────────────────────► ┌─────────────────┐             │
//! │  │ Idle │                              │ AwaitingPayment │             │
//! │  └──────┘ ◄─────────────────────────── └────────┬────────┘             │
//! │    ▲  │        cancel / dialog closed           │ tender confirmed     │
//! │    │  │                                         ▼                      │
//! │    │  │  begin() [credit, or payment     ┌────────────┐                │
//! │    │  └────────────────────────────────► │ Submitting │                │
//! │    │       already entered]              └─────┬──────┘                │
//! │    │                                           │                       │
//! │    └───────────────────────────────────────────┘                       │
//! │        finish() - success clears the cart upstream; failure leaves     │
//! │        it editable. Either way the gate returns to Idle.               │
//! │                                                                         │
//! │  begin() is refused while total ≤ 0, the cart is empty, or a          │
//! │  submission is in flight (the submit button is inert).                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartTotals;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::SalesProfile;

// =============================================================================
// Gate Stage
// =============================================================================

/// Where the gate currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    /// Cart is editable; nothing in flight.
    #[default]
    Idle,
    /// The payment dialog is open; submission waits on its confirm.
    AwaitingPayment,
    /// The order processor call is in flight.
    Submitting,
}

/// What `begin()` decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutAction {
    /// Open the payment dialog first (cash profile, no payment yet).
    OpenTender,
    /// Hand the transaction to the order processor now.
    SubmitDirect,
}

// =============================================================================
// Checkout Gate
// =============================================================================

/// Decides whether checkout goes straight to submission or via the payment
/// dialog, and keeps re-entrant submissions out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutGate {
    stage: CheckoutStage,
}

impl CheckoutGate {
    /// Creates an idle gate.
    pub fn new() -> Self {
        CheckoutGate::default()
    }

    /// Current stage.
    #[inline]
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Whether the submit control should be enabled.
    ///
    /// Inert whenever the total is non-positive, the cart is empty, or a
    /// submission is already in flight.
    pub fn can_submit(&self, totals: &CartTotals, cart_empty: bool) -> bool {
        totals.total_cents > 0 && !cart_empty && self.stage != CheckoutStage::Submitting
    }

    /// Starts checkout.
    ///
    /// ## Decision
    /// - credit profile, or a payment already entered (`paid > 0`):
    ///   straight to Submitting
    /// - cash profile with no payment: open the payment dialog first
    pub fn begin(
        &mut self,
        profile: SalesProfile,
        totals: &CartTotals,
        cart_empty: bool,
        paid_already: Money,
    ) -> CoreResult<CheckoutAction> {
        if self.stage == CheckoutStage::Submitting {
            return Err(CoreError::SubmissionInFlight);
        }
        if cart_empty {
            return Err(CoreError::EmptyCart);
        }
        if totals.total_cents <= 0 {
            return Err(CoreError::NonPositiveTotal {
                total_cents: totals.total_cents,
            });
        }

        if profile == SalesProfile::Credit || paid_already.is_positive() {
            self.stage = CheckoutStage::Submitting;
            Ok(CheckoutAction::SubmitDirect)
        } else {
            self.stage = CheckoutStage::AwaitingPayment;
            Ok(CheckoutAction::OpenTender)
        }
    }

    /// The payment dialog confirmed; submission may proceed.
    pub fn tender_confirmed(&mut self) -> CoreResult<()> {
        if self.stage != CheckoutStage::AwaitingPayment {
            return Err(CoreError::TenderNotOpen);
        }
        self.stage = CheckoutStage::Submitting;
        Ok(())
    }

    /// The payment dialog was dismissed without confirming.
    pub fn tender_cancelled(&mut self) {
        if self.stage == CheckoutStage::AwaitingPayment {
            self.stage = CheckoutStage::Idle;
        }
    }

    /// The order processor answered. Success and failure both land on Idle;
    /// on failure the cart upstream stays intact for a user-initiated retry.
    pub fn finish(&mut self) {
        self.stage = CheckoutStage::Idle;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(total_cents: i64) -> CartTotals {
        CartTotals {
            subtotal_cents: total_cents,
            discount_cents: 0,
            tax_cents: 0,
            total_cents,
            tax_rate_bps: 0,
        }
    }

    #[test]
    fn test_can_submit_conditions() {
        let gate = CheckoutGate::new();
        assert!(gate.can_submit(&totals(100), false));
        assert!(!gate.can_submit(&totals(0), false));
        assert!(!gate.can_submit(&totals(-50), false));
        assert!(!gate.can_submit(&totals(100), true));
    }

    #[test]
    fn test_cash_profile_without_payment_opens_tender() {
        let mut gate = CheckoutGate::new();
        let action = gate
            .begin(SalesProfile::Cash, &totals(15000), false, Money::zero())
            .unwrap();
        assert_eq!(action, CheckoutAction::OpenTender);
        assert_eq!(gate.stage(), CheckoutStage::AwaitingPayment);

        gate.tender_confirmed().unwrap();
        assert_eq!(gate.stage(), CheckoutStage::Submitting);
    }

    #[test]
    fn test_credit_profile_submits_directly() {
        let mut gate = CheckoutGate::new();
        let action = gate
            .begin(SalesProfile::Credit, &totals(15000), false, Money::zero())
            .unwrap();
        assert_eq!(action, CheckoutAction::SubmitDirect);
        assert_eq!(gate.stage(), CheckoutStage::Submitting);
    }

    #[test]
    fn test_entered_payment_skips_dialog() {
        let mut gate = CheckoutGate::new();
        let action = gate
            .begin(
                SalesProfile::Cash,
                &totals(15000),
                false,
                Money::from_cents(15000),
            )
            .unwrap();
        assert_eq!(action, CheckoutAction::SubmitDirect);
    }

    #[test]
    fn test_begin_refusals() {
        let mut gate = CheckoutGate::new();
        assert!(matches!(
            gate.begin(SalesProfile::Cash, &totals(100), true, Money::zero()),
            Err(CoreError::EmptyCart)
        ));
        assert!(matches!(
            gate.begin(SalesProfile::Cash, &totals(0), false, Money::zero()),
            Err(CoreError::NonPositiveTotal { .. })
        ));

        gate.begin(SalesProfile::Credit, &totals(100), false, Money::zero())
            .unwrap();
        assert!(matches!(
            gate.begin(SalesProfile::Credit, &totals(100), false, Money::zero()),
            Err(CoreError::SubmissionInFlight)
        ));
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut gate = CheckoutGate::new();
        gate.begin(SalesProfile::Cash, &totals(100), false, Money::zero())
            .unwrap();
        gate.tender_cancelled();
        assert_eq!(gate.stage(), CheckoutStage::Idle);
    }

    #[test]
    fn test_finish_returns_to_idle_either_way() {
        let mut gate = CheckoutGate::new();
        gate.begin(SalesProfile::Credit, &totals(100), false, Money::zero())
            .unwrap();
        gate.finish();
        assert_eq!(gate.stage(), CheckoutStage::Idle);
        assert!(gate.can_submit(&totals(100), false));
    }

    #[test]
    fn test_tender_confirmed_requires_open_dialog() {
        let mut gate = CheckoutGate::new();
        assert!(matches!(
            gate.tender_confirmed(),
            Err(CoreError::TenderNotOpen)
        ));
    }
}
