//! # Payload Transform Layer
//!
//! The single place wire payloads become domain values.
//!
//! Rules that live here and nowhere else:
//! - decimal major-unit amounts → integer cents (half-up)
//! - percentage floats → basis points
//! - missing `order_of_display` → [`DEFAULT_DISPLAY_ORDER`]
//! - payment-type lists filtered to `is_active && used_in_sales` and sorted
//!   by display order ascending, then name, before the core ever sees them

use vesta_core::types::{Customer, PaymentType, Product, SalesAgent};
use vesta_core::DEFAULT_DISPLAY_ORDER;

use crate::dto::{CustomerDto, PageDto, PaymentTypeDto, ProductDto, SalesAgentDto};

// =============================================================================
// Pagination
// =============================================================================

/// A normalized page of lookup results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// Maps a wire page through an item transform.
    pub fn from_wire<D>(dto: PageDto<D>, f: impl Fn(D) -> T) -> Self {
        Page {
            items: dto.data.into_iter().map(f).collect(),
            page: dto.page,
            total: dto.total,
        }
    }
}

// =============================================================================
// Amount Conversion
// =============================================================================

/// Major-unit decimal → integer cents, half-up. Floats exist only on the
/// wire; they die here.
fn major_units_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Percentage float → basis points (18.0 → 1800).
fn percentage_to_bps(pct: f64) -> u32 {
    (pct * 100.0).round().max(0.0) as u32
}

// =============================================================================
// Entity Transforms
// =============================================================================

/// Normalizes a product payload.
pub fn product_from_wire(dto: ProductDto) -> Product {
    Product {
        id: dto.id,
        code: dto.product_code,
        name: dto.product_name,
        image_url: dto.image_url,
        price_cents: major_units_to_cents(dto.sale_price),
        tax_rate_bps: percentage_to_bps(dto.tax_percentage),
        is_active: dto.is_active,
    }
}

/// Normalizes a customer payload.
pub fn customer_from_wire(dto: CustomerDto) -> Customer {
    Customer {
        id: dto.id,
        name: dto.customer_name,
        deposit_cents: major_units_to_cents(dto.deposit_amount),
        loyalty_points: dto.loyalty_points,
    }
}

/// Normalizes a sales agent payload.
pub fn agent_from_wire(dto: SalesAgentDto) -> SalesAgent {
    SalesAgent {
        id: dto.id,
        name: dto.agent_name,
    }
}

/// Normalizes a single payment type payload.
pub fn payment_type_from_wire(dto: PaymentTypeDto) -> PaymentType {
    PaymentType {
        id: dto.id,
        name: dto.payment_type_name,
        code: dto.payment_type_code,
        is_active: dto.is_active,
        used_in_sales: dto.used_in_sales,
        used_in_debtor_payments: dto.used_in_debtor_payments,
        display_order: dto.order_of_display.unwrap_or(DEFAULT_DISPLAY_ORDER),
    }
}

/// Normalizes, filters, and sorts the payment-type list for sales checkout.
///
/// The core's default-selection policy assumes exactly this ordering:
/// active sales types, display order ascending (999 for unset), name as the
/// tie-breaker.
pub fn sales_payment_types_from_wire(dtos: Vec<PaymentTypeDto>) -> Vec<PaymentType> {
    let mut types: Vec<PaymentType> = dtos
        .into_iter()
        .map(payment_type_from_wire)
        .filter(|t| t.is_active && t.used_in_sales)
        .collect();
    types.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });
    types
}

// =============================================================================
// Unit Tests
// =============================================================================
