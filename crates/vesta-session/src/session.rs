//! # POS Session
//!
//! One cashier-facing checkout session: the cart, the customer/agent
//! association, the tender dialog, and the submission gate, wired to the
//! backend through injected collaborator traits.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│  Tender  │────►│Submitted │       │
//! │  │  Cart    │     │          │     │  Dialog  │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       confirm_tender                     │
//! │                   update_discount   (or direct submit on               │
//! │                   remove_vat         credit / prepaid)                 │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! │                                                                         │
//! │  Collaborator failures surface as transient notifications and leave    │
//! │  the cart exactly as it was. Nothing is retried automatically.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All mutation is synchronous on the session owner's thread; the only
//! `.await` points are single-flight collaborator calls.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use vesta_client::services::{
    CustomerLookup, OrderProcessor, PaymentTypeLookup, ProductLookup, SalesAgentLookup,
};
use vesta_core::cart::{Cart, CartTotals, DiscountMode, LineItem};
use vesta_core::checkout::{CheckoutAction, CheckoutGate, CheckoutStage};
use vesta_core::money::Money;
use vesta_core::tender::{default_payment_type, TenderSession};
use vesta_core::types::{
    Customer, OrderDraft, OrderLine, OrderPayment, PaymentType, ProductRef, Quantity, Rate,
    SalesAgent,
};
use vesta_core::CoreError;

use crate::config::PosConfig;
use crate::error::{ErrorCode, SessionError};

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Collaborators
// =============================================================================

/// The injected collaborator set.
///
/// Constructor parameters instead of ambient context: a session built from
/// five in-memory fakes behaves identically to one built from REST clients.
#[derive(Clone)]
pub struct Collaborators {
    pub products: Arc<dyn ProductLookup>,
    pub customers: Arc<dyn CustomerLookup>,
    pub agents: Arc<dyn SalesAgentLookup>,
    pub payment_types: Arc<dyn PaymentTypeLookup>,
    pub orders: Arc<dyn OrderProcessor>,
}

// =============================================================================
// View Models
// =============================================================================

/// Cart state returned to the frontend after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<LineItem>,
    pub totals: CartTotals,
    pub customer: Option<Customer>,
    pub sales_agent: Option<SalesAgent>,
    /// Whether the submit control should be enabled.
    pub can_submit: bool,
}

/// Payment dialog state for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderView {
    /// Grand total snapshot, formatted to two decimals ("150.00").
    pub total: String,
    /// Tendered amount as entered, formatted ("200.00").
    pub paid: String,
    /// Change due back ("50.00").
    pub change: String,
    /// Outstanding balance ("0.00").
    pub balance: String,
    pub payment_type_id: Option<String>,
    /// Active sales payment types, priority-sorted.
    pub payment_types: Vec<PaymentType>,
}

/// Acknowledged submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub order_id: String,
    pub receipt_number: String,
    pub total_cents: i64,
    pub change_cents: i64,
}

/// What `begin_checkout` decided.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum CheckoutOutcome {
    /// The payment dialog must be confirmed first.
    TenderOpened(TenderView),
    /// The order went straight through.
    Submitted(SubmissionView),
}

/// A payment entered on the checkout panel before submission (without the
/// dialog). Its presence routes a cash sale straight to submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    pub payment_type_id: String,
    pub amount_cents: i64,
}

// =============================================================================
// POS Session
// =============================================================================

/// One checkout session. Single mutator: the local cashier.
pub struct PosSession {
    config: PosConfig,
    collaborators: Collaborators,
    cart: Cart,
    customer: Option<Customer>,
    agent: Option<SalesAgent>,
    entered_payment: Option<PaymentEntry>,
    gate: CheckoutGate,
    tender: Option<TenderSession>,
    tender_types: Vec<PaymentType>,
}

impl PosSession {
    /// Creates an empty session.
    pub fn new(config: PosConfig, collaborators: Collaborators) -> Self {
        PosSession {
            config,
            collaborators,
            cart: Cart::new(),
            customer: None,
            agent: None,
            entered_payment: None,
            gate: CheckoutGate::new(),
            tender: None,
            tender_types: Vec::new(),
        }
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Looks up a product and appends it to the cart.
    pub async fn add_to_cart(&mut self, product_id: &str, quantity: Quantity) -> SessionResult<CartView> {
        debug!(product_id = %product_id, quantity = %quantity, "add_to_cart");

        let product = self
            .collaborators
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| SessionError::not_found("Product", product_id))?;

        if !product.is_active {
            return Err(SessionError::new(
                ErrorCode::ValidationError,
                "Product is not available for sale",
            ));
        }

        self.cart.add_item(
            ProductRef::from_product(&product),
            quantity,
            product.price(),
            product.tax_rate(),
        )?;

        Ok(self.cart_view())
    }

    /// Sets a line's quantity (clamped to the 0.01 floor).
    pub fn update_quantity(&mut self, index: usize, quantity: Quantity) -> SessionResult<CartView> {
        debug!(index, quantity = %quantity, "update_quantity");
        self.cart.update_quantity(index, quantity)?;
        Ok(self.cart_view())
    }

    /// One stepper increment. Wired to the hold-to-repeat driver.
    pub fn increment_quantity(&mut self, index: usize) -> SessionResult<CartView> {
        self.cart.increment_quantity(index)?;
        Ok(self.cart_view())
    }

    /// One stepper decrement, floored at 0.01.
    pub fn decrement_quantity(&mut self, index: usize) -> SessionResult<CartView> {
        self.cart.decrement_quantity(index)?;
        Ok(self.cart_view())
    }

    /// Explicit price override.
    pub fn update_price(&mut self, index: usize, unit_price: Money) -> SessionResult<CartView> {
        debug!(index, price = %unit_price, "update_price");
        self.cart.update_price(index, unit_price)?;
        Ok(self.cart_view())
    }

    /// Sets a line discount; the caller has already reconciled the
    /// percentage and amount views and names the authoritative one.
    pub fn update_discount(
        &mut self,
        index: usize,
        rate: Rate,
        amount: Money,
        mode: DiscountMode,
    ) -> SessionResult<CartView> {
        debug!(index, bps = rate.bps(), amount = %amount, "update_discount");
        self.cart.update_discount(index, rate, amount, mode)?;
        Ok(self.cart_view())
    }

    /// Removes VAT from a line.
    pub fn remove_vat(&mut self, index: usize) -> SessionResult<CartView> {
        debug!(index, "remove_vat");
        self.cart.remove_vat(index)?;
        Ok(self.cart_view())
    }

    /// Restores VAT on a line from its retained original rate.
    pub fn add_vat(&mut self, index: usize) -> SessionResult<CartView> {
        debug!(index, "add_vat");
        self.cart.add_vat(index)?;
        Ok(self.cart_view())
    }

    /// Removes a line.
    pub fn remove_item(&mut self, index: usize) -> SessionResult<CartView> {
        debug!(index, "remove_item");
        self.cart.remove_item(index)?;
        Ok(self.cart_view())
    }

    /// Clears the cart and every per-transaction association.
    pub fn clear_cart(&mut self) -> CartView {
        debug!("clear_cart");
        self.reset_transaction();
        self.cart_view()
    }

    /// Current cart state.
    pub fn cart_view(&self) -> CartView {
        let totals = self.cart.totals();
        CartView {
            lines: self.cart.lines.clone(),
            totals,
            customer: self.customer.clone(),
            sales_agent: self.agent.clone(),
            can_submit: self.gate.can_submit(&totals, self.cart.is_empty()),
        }
    }

    // =========================================================================
    // Associations
    // =========================================================================

    /// Attaches a customer (display/deposit info only; pricing untouched),
    /// or detaches with `None`.
    pub async fn set_customer(&mut self, customer_id: Option<&str>) -> SessionResult<CartView> {
        self.customer = match customer_id {
            None => None,
            Some(id) => Some(
                self.collaborators
                    .customers
                    .get(id)
                    .await?
                    .ok_or_else(|| SessionError::not_found("Customer", id))?,
            ),
        };
        Ok(self.cart_view())
    }

    /// Attaches a sales agent for attribution, or detaches with `None`.
    pub async fn set_sales_agent(&mut self, agent_id: Option<&str>) -> SessionResult<CartView> {
        self.agent = match agent_id {
            None => None,
            Some(id) => Some(
                self.collaborators
                    .agents
                    .get(id)
                    .await?
                    .ok_or_else(|| SessionError::not_found("Sales agent", id))?,
            ),
        };
        Ok(self.cart_view())
    }

    // =========================================================================
    // Pre-Entered Payment
    // =========================================================================

    /// Records a payment entered on the checkout panel itself. A cash sale
    /// with a recorded payment skips the tender dialog.
    pub fn record_payment(
        &mut self,
        payment_type_id: impl Into<String>,
        amount: Money,
    ) -> SessionResult<()> {
        vesta_core::validation::validate_payment_amount(amount)
            .map_err(CoreError::Validation)
            .map_err(SessionError::from)?;
        self.entered_payment = Some(PaymentEntry {
            payment_type_id: payment_type_id.into(),
            amount_cents: amount.cents(),
        });
        Ok(())
    }

    /// Clears the pre-entered payment.
    pub fn clear_payment(&mut self) {
        self.entered_payment = None;
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Starts checkout.
    ///
    /// Cash profile with no payment entered opens the tender dialog;
    /// credit profile or a pre-entered payment submits directly.
    pub async fn begin_checkout(&mut self) -> SessionResult<CheckoutOutcome> {
        let totals = self.cart.totals();
        let paid_already = Money::from_cents(
            self.entered_payment
                .as_ref()
                .map(|p| p.amount_cents)
                .unwrap_or(0),
        );
        debug!(total = totals.total_cents, paid = paid_already.cents(), "begin_checkout");

        let action = self.gate.begin(
            self.config.sales.profile,
            &totals,
            self.cart.is_empty(),
            paid_already,
        )?;

        match action {
            CheckoutAction::OpenTender => match self.open_tender(totals.total()).await {
                Ok(view) => Ok(CheckoutOutcome::TenderOpened(view)),
                Err(e) => {
                    // dialog never opened; give the gate back
                    self.gate.tender_cancelled();
                    Err(e)
                }
            },
            CheckoutAction::SubmitDirect => {
                let payment = self.entered_payment.clone().map(|p| OrderPayment {
                    change_cents: vesta_core::tender::change(
                        Money::from_cents(p.amount_cents),
                        totals.total(),
                    )
                    .cents(),
                    payment_type_id: p.payment_type_id,
                    amount_cents: p.amount_cents,
                });
                let view = self.submit_order(totals, payment).await?;
                Ok(CheckoutOutcome::Submitted(view))
            }
        }
    }

    /// Replaces the tendered amount from raw field input.
    pub fn set_tender_amount(&mut self, input: &str) -> SessionResult<TenderView> {
        let tender = self.tender.as_mut().ok_or(CoreError::TenderNotOpen)?;
        tender.set_amount_str(input)?;
        Ok(Self::tender_view_of(tender, &self.tender_types))
    }

    /// Selects the tender payment type.
    pub fn set_tender_type(&mut self, payment_type_id: &str) -> SessionResult<TenderView> {
        let tender = self.tender.as_mut().ok_or(CoreError::TenderNotOpen)?;
        tender.set_payment_type(payment_type_id)?;
        Ok(Self::tender_view_of(tender, &self.tender_types))
    }

    /// The open tender dialog, if any.
    pub fn tender_view(&self) -> Option<TenderView> {
        self.tender
            .as_ref()
            .map(|t| Self::tender_view_of(t, &self.tender_types))
    }

    /// Confirms the tender dialog and submits the order.
    ///
    /// Validation failures keep the dialog open with a field-level error;
    /// a collaborator failure closes it and leaves the cart editable.
    pub async fn confirm_tender(&mut self) -> SessionResult<SubmissionView> {
        let tender = self.tender.as_mut().ok_or(CoreError::TenderNotOpen)?;
        let receipt = tender.confirm()?;
        self.gate.tender_confirmed()?;
        self.tender = None;

        let totals = self.cart.totals();
        info!(
            payment_type = %receipt.payment_type_id,
            amount = receipt.amount_cents,
            change = receipt.change_cents,
            "tender confirmed"
        );

        self.submit_order(
            totals,
            Some(OrderPayment {
                payment_type_id: receipt.payment_type_id,
                amount_cents: receipt.amount_cents,
                change_cents: receipt.change_cents,
            }),
        )
        .await
    }

    /// Dismisses the tender dialog without paying.
    pub fn cancel_tender(&mut self) {
        debug!("cancel_tender");
        self.tender = None;
        self.tender_types.clear();
        self.gate.tender_cancelled();
    }

    /// Current checkout stage (drives the submit button state).
    pub fn checkout_stage(&self) -> CheckoutStage {
        self.gate.stage()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Fetches payment types and opens the tender dialog for `total`.
    async fn open_tender(&mut self, total: Money) -> SessionResult<TenderView> {
        let types = self.collaborators.payment_types.list_for_sales().await?;
        let tolerance = Rate::from_bps(self.config.sales.overpayment_tolerance_bps);
        let tender = TenderSession::open_with_tolerance(total, default_payment_type(&types), tolerance);

        info!(total = %total, default_type = ?tender.payment_type_id(), "tender dialog opened");
        let view = Self::tender_view_of(&tender, &types);
        self.tender = Some(tender);
        self.tender_types = types;
        Ok(view)
    }

    /// Assembles the order draft and hands it to the order processor.
    ///
    /// Success clears the cart for the next transaction; failure restores
    /// Idle with the cart intact - the retry is the user's.
    async fn submit_order(
        &mut self,
        totals: CartTotals,
        payment: Option<OrderPayment>,
    ) -> SessionResult<SubmissionView> {
        let draft = self.assemble_draft(&totals, payment);

        match self.collaborators.orders.submit(&draft).await {
            Ok(ack) => {
                self.gate.finish();
                let change_cents = draft.payment.as_ref().map(|p| p.change_cents).unwrap_or(0);
                info!(
                    order_id = %ack.order_id,
                    receipt = %ack.receipt_number,
                    total = draft.total_cents,
                    "order submitted"
                );
                self.reset_transaction();
                Ok(SubmissionView {
                    order_id: ack.order_id,
                    receipt_number: ack.receipt_number,
                    total_cents: draft.total_cents,
                    change_cents,
                })
            }
            Err(e) => {
                self.gate.finish();
                warn!(error = %e, "order submission failed; cart left editable");
                Err(e.into())
            }
        }
    }

    fn assemble_draft(&self, totals: &CartTotals, payment: Option<OrderPayment>) -> OrderDraft {
        let lines = self
            .cart
            .lines
            .iter()
            .map(|line: &LineItem| OrderLine {
                product_id: line.product.id.clone(),
                code_snapshot: line.product.code.clone(),
                name_snapshot: line.product.name.clone(),
                quantity: line.quantity,
                unit_price_cents: line.unit_price_cents,
                discount_cents: line.discount_cents,
                tax_cents: line.tax_cents,
                line_total_cents: line.line_total().cents(),
            })
            .collect();

        OrderDraft {
            id: Uuid::new_v4().to_string(),
            receipt_number: generate_receipt_number(),
            profile: self.config.sales.profile,
            lines,
            subtotal_cents: totals.subtotal_cents,
            discount_cents: totals.discount_cents,
            tax_cents: totals.tax_cents,
            total_cents: totals.total_cents,
            payment,
            customer_id: self.customer.as_ref().map(|c| c.id.clone()),
            sales_agent_id: self.agent.as_ref().map(|a| a.id.clone()),
            created_at: Utc::now(),
        }
    }

    fn tender_view_of(tender: &TenderSession, types: &[PaymentType]) -> TenderView {
        TenderView {
            total: tender.total().to_string(),
            paid: tender.paid().to_string(),
            change: tender.change().to_string(),
            balance: tender.balance().to_string(),
            payment_type_id: tender.payment_type_id().map(str::to_string),
            payment_types: types.to_vec(),
        }
    }

    fn reset_transaction(&mut self) {
        self.cart.clear();
        self.customer = None;
        self.agent = None;
        self.entered_payment = None;
        self.tender = None;
        self.tender_types.clear();
    }
}

/// Generates a human-readable receipt number: `yymmdd-HHMMSS-nnnn`.
fn generate_receipt_number() -> String {
    let now = Utc::now();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    let random: u16 = (nanos % 10000) as u16;
    format!("{}-{:04}", now.format("%y%m%d-%H%M%S"), random)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_number_shape() {
        let receipt = generate_receipt_number();
        // yymmdd-HHMMSS-nnnn
        assert_eq!(receipt.len(), 18);
        assert_eq!(receipt.matches('-').count(), 2);
    }
}
