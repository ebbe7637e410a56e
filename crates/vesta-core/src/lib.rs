//! # vesta-core: Pure Business Logic for Vesta POS
//!
//! This crate is the **heart** of Vesta POS. It contains the cart pricing
//! and payment-reconciliation logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vesta POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (SPA)                               │   │
//! │  │    Sell Screen ──► Cart Panel ──► Payment Dialog ──► Receipt   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vesta-session                                │   │
//! │  │    add_to_cart, update_discount, begin_checkout, ...           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vesta-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │  tender   │  │ checkout  │  │   │
//! │  │   │   Money   │  │ LineItem  │  │  change   │  │   gate    │  │   │
//! │  │   │   Rate    │  │  totals   │  │ tolerance │  │  stages   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO TIMERS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vesta-client (Collaborators)                 │   │
//! │  │         lookups, payload normalization, order processing        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, PaymentType, Quantity, Rate, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Line-item model and the aggregate totals calculator
//! - [`tender`] - Payment/change calculator and the tender dialog machine
//! - [`checkout`] - Transaction submission gate
//! - [`stepper`] - Press-and-hold repeat state machine (clock injected)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and ambient clocks are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float drift
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vesta_core::cart::Cart;
//! use vesta_core::money::Money;
//! use vesta_core::types::{ProductRef, Quantity, Rate};
//!
//! let mut cart = Cart::new();
//! cart.add_item(
//!     ProductRef {
//!         id: "p-1".into(),
//!         code: "COKE-330".into(),
//!         name: "Coca-Cola 330ml".into(),
//!         image_url: None,
//!     },
//!     Quantity::from_whole(2),
//!     Money::from_cents(10000),
//!     Rate::from_bps(1800),
//! ).unwrap();
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal_cents, 20000);
//! assert_eq!(totals.tax_cents, 3600);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod stepper;
pub mod tender;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vesta_core::Money` instead of
// `use vesta_core::money::Money`

pub use cart::{Cart, CartTotals, DiscountMode, LineItem};
pub use checkout::{CheckoutAction, CheckoutGate, CheckoutStage};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use stepper::StepRepeater;
pub use tender::{TenderReceipt, TenderSession, TenderState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable per-store in future versions.
pub const MAX_CART_LINES: usize = 100;

/// Overpayment tolerance in basis points (1000 = 10%)
///
/// ## Business Reason
/// A tendered amount slightly above the total is normal cash handling;
/// an amount more than 10% over is almost always a typo and is rejected
/// before it reaches the order processor.
pub const OVERPAYMENT_TOLERANCE_BPS: u32 = 1000;

/// Sort key assigned to payment types the backend left unordered
///
/// Payment-type lists sort by `display_order` ascending; unset entries
/// sink to the bottom with this value.
pub const DEFAULT_DISPLAY_ORDER: u32 = 999;
