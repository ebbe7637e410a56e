//! End-to-end checkout flows against the in-memory collaborators.

use std::sync::Arc;

use vesta_client::dto::PaymentTypeDto;
use vesta_client::memory::{
    InMemoryCatalog, InMemoryDirectory, InMemoryPaymentTypes, RecordingOrderProcessor,
};
use vesta_core::checkout::CheckoutStage;
use vesta_core::money::Money;
use vesta_core::types::{Customer, Product, Quantity, SalesAgent, SalesProfile};
use vesta_session::{CheckoutOutcome, Collaborators, ErrorCode, PosConfig, PosSession};

fn product(id: &str, name: &str, price_cents: i64, tax_bps: u32) -> Product {
    Product {
        id: id.to_string(),
        code: format!("SKU-{}", id),
        name: name.to_string(),
        image_url: None,
        price_cents,
        tax_rate_bps: tax_bps,
        is_active: true,
    }
}

fn payment_type(id: &str, name: &str, order: Option<u32>) -> PaymentTypeDto {
    PaymentTypeDto {
        id: id.to_string(),
        payment_type_name: name.to_string(),
        payment_type_code: String::new(),
        is_active: true,
        used_in_sales: true,
        used_in_debtor_payments: false,
        order_of_display: order,
    }
}

struct Fixture {
    session: PosSession,
    orders: Arc<RecordingOrderProcessor>,
}

fn fixture(profile: SalesProfile) -> Fixture {
    let mut config = PosConfig::default();
    config.sales.profile = profile;

    let orders = Arc::new(RecordingOrderProcessor::new());
    let collaborators = Collaborators {
        products: Arc::new(InMemoryCatalog::with_products(vec![
            product("p-1", "Gift Basket", 7500, 0),
            product("p-2", "Taxed Widget", 10000, 1800),
        ])),
        customers: Arc::new(InMemoryDirectory::new(
            vec![Customer {
                id: "c-1".into(),
                name: "Walk-in".into(),
                deposit_cents: 0,
                loyalty_points: 0,
            }],
            vec![],
        )),
        agents: Arc::new(InMemoryDirectory::new(
            vec![],
            vec![SalesAgent {
                id: "a-1".into(),
                name: "Dana".into(),
            }],
        )),
        payment_types: Arc::new(InMemoryPaymentTypes::with_wire_types(vec![
            payment_type("pt-card", "Card Terminal", Some(1)),
            payment_type("pt-cash", "Cash", Some(2)),
        ])),
        orders: orders.clone(),
    };

    Fixture {
        session: PosSession::new(config, collaborators),
        orders,
    }
}

#[tokio::test]
async fn cash_flow_through_tender_dialog() {
    let Fixture { mut session, orders } = fixture(SalesProfile::Cash);

    // two gift baskets at 75.00 → total 150.00, no tax
    session
        .add_to_cart("p-1", Quantity::from_whole(2))
        .await
        .unwrap();
    assert_eq!(session.cart_view().totals.total_cents, 15000);

    // submit opens the payment dialog, defaulted to the total and to the
    // cash-like payment type even though card sorts first
    let outcome = session.begin_checkout().await.unwrap();
    let dialog = match outcome {
        CheckoutOutcome::TenderOpened(dialog) => dialog,
        other => panic!("expected tender dialog, got {:?}", other),
    };
    assert_eq!(dialog.total, "150.00");
    assert_eq!(dialog.paid, "150.00");
    assert_eq!(dialog.payment_type_id.as_deref(), Some("pt-cash"));
    assert_eq!(session.checkout_stage(), CheckoutStage::AwaitingPayment);

    // entering 200 shows change 50.00
    let dialog = session.set_tender_amount("200").unwrap();
    assert_eq!(dialog.change, "50.00");
    assert_eq!(dialog.balance, "0.00");

    // confirming submits (paymentTypeId, 20000) to the order processor
    let submission = session.confirm_tender().await.unwrap();
    assert_eq!(submission.total_cents, 15000);
    assert_eq!(submission.change_cents, 5000);

    let submitted = orders.submitted();
    assert_eq!(submitted.len(), 1);
    let payment = submitted[0].payment.as_ref().unwrap();
    assert_eq!(payment.payment_type_id, "pt-cash");
    assert_eq!(payment.amount_cents, 20000);

    // session resets for the next transaction
    assert!(session.cart_view().lines.is_empty());
    assert_eq!(session.checkout_stage(), CheckoutStage::Idle);
}

#[tokio::test]
async fn credit_profile_submits_directly() {
    let Fixture { mut session, orders } = fixture(SalesProfile::Credit);

    session
        .add_to_cart("p-2", Quantity::from_whole(1))
        .await
        .unwrap();

    let outcome = session.begin_checkout().await.unwrap();
    let submission = match outcome {
        CheckoutOutcome::Submitted(view) => view,
        other => panic!("expected direct submission, got {:?}", other),
    };

    // 100.00 + 18% tax
    assert_eq!(submission.total_cents, 11800);
    let submitted = orders.submitted();
    assert_eq!(submitted.len(), 1);
    assert!(submitted[0].payment.is_none());
    assert_eq!(submitted[0].profile, SalesProfile::Credit);
}

#[tokio::test]
async fn prepaid_cash_sale_skips_dialog() {
    let Fixture { mut session, orders } = fixture(SalesProfile::Cash);

    session
        .add_to_cart("p-1", Quantity::from_whole(2))
        .await
        .unwrap();
    session
        .record_payment("pt-cash", Money::from_cents(15000))
        .unwrap();

    let outcome = session.begin_checkout().await.unwrap();
    assert!(matches!(outcome, CheckoutOutcome::Submitted(_)));

    let payment = orders.submitted()[0].payment.clone().unwrap();
    assert_eq!(payment.amount_cents, 15000);
    assert_eq!(payment.change_cents, 0);
}

#[tokio::test]
async fn tender_validation_keeps_dialog_open() {
    let Fixture { mut session, .. } = fixture(SalesProfile::Cash);

    session
        .add_to_cart("p-1", Quantity::from_whole(2))
        .await
        .unwrap();
    session.begin_checkout().await.unwrap();

    // 10% over plus one cent: rejected, field-level, dialog still open
    let err = {
        session.set_tender_amount("165.01").unwrap();
        session.confirm_tender().await.unwrap_err()
    };
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(err.field.as_deref(), Some("amount"));
    assert_eq!(session.checkout_stage(), CheckoutStage::AwaitingPayment);
    assert!(session.tender_view().is_some());

    // unparseable input is a field error and leaves the amount unchanged
    let err = session.set_tender_amount("12.345").unwrap_err();
    assert_eq!(err.field.as_deref(), Some("amount"));

    // exactly the ceiling passes
    session.set_tender_amount("165.00").unwrap();
    assert!(session.confirm_tender().await.is_ok());
}

#[tokio::test]
async fn failed_submission_leaves_cart_editable() {
    let Fixture { mut session, orders } = fixture(SalesProfile::Credit);

    session
        .add_to_cart("p-1", Quantity::from_whole(2))
        .await
        .unwrap();
    orders.fail_next();

    let err = session.begin_checkout().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ServiceError);

    // cart intact, gate back to Idle, retry is user-initiated
    let view = session.cart_view();
    assert_eq!(view.lines.len(), 1);
    assert_eq!(session.checkout_stage(), CheckoutStage::Idle);
    assert!(view.can_submit);

    assert!(session.begin_checkout().await.is_ok());
    assert_eq!(orders.submitted().len(), 1);
}

#[tokio::test]
async fn cancel_tender_returns_to_idle() {
    let Fixture { mut session, orders } = fixture(SalesProfile::Cash);

    session
        .add_to_cart("p-1", Quantity::from_whole(1))
        .await
        .unwrap();
    session.begin_checkout().await.unwrap();
    assert_eq!(session.checkout_stage(), CheckoutStage::AwaitingPayment);

    session.cancel_tender();
    assert_eq!(session.checkout_stage(), CheckoutStage::Idle);
    assert!(session.tender_view().is_none());
    assert!(orders.submitted().is_empty());
    assert_eq!(session.cart_view().lines.len(), 1);
}

#[tokio::test]
async fn submit_disabled_on_empty_cart() {
    let Fixture { mut session, .. } = fixture(SalesProfile::Cash);

    assert!(!session.cart_view().can_submit);
    let err = session.begin_checkout().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CheckoutError);
}

#[tokio::test]
async fn associations_ride_along_without_touching_pricing() {
    let Fixture { mut session, orders } = fixture(SalesProfile::Credit);

    session
        .add_to_cart("p-2", Quantity::from_whole(1))
        .await
        .unwrap();
    let total_before = session.cart_view().totals.total_cents;

    session.set_customer(Some("c-1")).await.unwrap();
    session.set_sales_agent(Some("a-1")).await.unwrap();
    assert_eq!(session.cart_view().totals.total_cents, total_before);

    session.begin_checkout().await.unwrap();
    let submitted = orders.submitted();
    let draft = &submitted[0];
    assert_eq!(draft.customer_id.as_deref(), Some("c-1"));
    assert_eq!(draft.sales_agent_id.as_deref(), Some("a-1"));

    // unknown ids are NotFound, not silent
    let err = session.set_customer(Some("missing")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}
