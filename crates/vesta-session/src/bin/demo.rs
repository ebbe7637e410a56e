//! # Scripted Checkout Demo
//!
//! Runs one complete cash sale against the in-memory collaborators.
//!
//! ## Usage
//! ```bash
//! cargo run -p vesta-session --bin demo
//!
//! # Credit profile (skips the tender dialog)
//! VESTA_SALES_PROFILE=credit cargo run -p vesta-session --bin demo
//! ```
//!
//! The script mirrors a cashier's flow: add products, bump a quantity,
//! discount a line, drop VAT from another, attach a customer and agent,
//! then check out through the payment dialog.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use vesta_client::dto::PaymentTypeDto;
use vesta_client::memory::{
    InMemoryCatalog, InMemoryDirectory, InMemoryPaymentTypes, RecordingOrderProcessor,
};
use vesta_core::cart::DiscountMode;
use vesta_core::money::Money;
use vesta_core::types::{Customer, Product, Quantity, Rate, SalesAgent};
use vesta_session::{CheckoutOutcome, Collaborators, PosConfig, PosSession};

fn seed_products() -> Vec<Product> {
    let item = |id: &str, code: &str, name: &str, cents: i64, tax_bps: u32| Product {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        image_url: None,
        price_cents: cents,
        tax_rate_bps: tax_bps,
        is_active: true,
    };
    vec![
        item("p-1", "BEV-001", "Coca-Cola 330ml", 299, 1800),
        item("p-2", "SNK-014", "Lays Classic", 249, 1800),
        item("p-3", "DRY-003", "Whole Milk 1L", 189, 0),
    ]
}

fn seed_payment_types() -> Vec<PaymentTypeDto> {
    let wire = |id: &str, name: &str, sales: bool, order: Option<u32>| PaymentTypeDto {
        id: id.to_string(),
        payment_type_name: name.to_string(),
        payment_type_code: String::new(),
        is_active: true,
        used_in_sales: sales,
        used_in_debtor_payments: !sales,
        order_of_display: order,
    };
    vec![
        wire("pt-1", "Card Terminal", true, Some(1)),
        wire("pt-2", "Cash", true, Some(2)),
        wire("pt-3", "Bank Transfer", false, Some(3)),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PosConfig::load_or_default(None);
    info!(profile = %config.sales.profile, store = %config.store.name, "demo starting");

    let orders = Arc::new(RecordingOrderProcessor::new());
    let collaborators = Collaborators {
        products: Arc::new(InMemoryCatalog::with_products(seed_products())),
        customers: Arc::new(InMemoryDirectory::new(
            vec![Customer {
                id: "c-1".into(),
                name: "Walk-in Regular".into(),
                deposit_cents: 2500,
                loyalty_points: 140,
            }],
            vec![SalesAgent {
                id: "a-1".into(),
                name: "Dana".into(),
            }],
        )),
        agents: Arc::new(InMemoryDirectory::new(
            vec![],
            vec![SalesAgent {
                id: "a-1".into(),
                name: "Dana".into(),
            }],
        )),
        payment_types: Arc::new(InMemoryPaymentTypes::with_wire_types(seed_payment_types())),
        orders: orders.clone(),
    };

    let mut session = PosSession::new(config, collaborators);

    // ring up the basket
    session.add_to_cart("p-1", Quantity::from_whole(2)).await?;
    session.add_to_cart("p-2", Quantity::from_whole(1)).await?;
    session.add_to_cart("p-3", Quantity::from_whole(1)).await?;
    session.increment_quantity(1)?;

    // 10% off the cola line; milk is sold VAT-free today
    let cola_gross = session.cart_view().lines[0].gross();
    session.update_discount(
        0,
        Rate::from_bps(1000),
        cola_gross.percent_of(Rate::from_bps(1000)),
        DiscountMode::Percentage,
    )?;
    session.remove_vat(2)?;

    session.set_customer(Some("c-1")).await?;
    session.set_sales_agent(Some("a-1")).await?;

    let view = session.cart_view();
    info!(
        subtotal = view.totals.subtotal_cents,
        discount = view.totals.discount_cents,
        tax = view.totals.tax_cents,
        total = view.totals.total_cents,
        "cart ready"
    );

    // checkout
    let submission = match session.begin_checkout().await? {
        CheckoutOutcome::Submitted(view) => view,
        CheckoutOutcome::TenderOpened(dialog) => {
            info!(total = %dialog.total, default_paid = %dialog.paid, "tender dialog open");

            // customer hands over 15.00 in cash
            let dialog = session.set_tender_amount("15.00")?;
            info!(paid = %dialog.paid, change = %dialog.change, "tender entered");

            session.confirm_tender().await?
        }
    };

    info!(
        order_id = %submission.order_id,
        receipt = %submission.receipt_number,
        total = %Money::from_cents(submission.total_cents),
        change = %Money::from_cents(submission.change_cents),
        "sale complete"
    );

    info!(submitted = orders.submitted().len(), "demo finished");
    Ok(())
}
