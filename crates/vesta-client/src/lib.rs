//! # vesta-client: Collaborator Boundary for Vesta POS
//!
//! This crate owns the seam between the checkout core and the backend
//! services it consumes as black boxes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vesta POS Data Flow                              │
//! │                                                                         │
//! │  Session operation (add_to_cart, begin_checkout)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vesta-client (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    services   │    │   transform   │    │     dto      │  │   │
//! │  │   │  (traits.rs)  │    │ (normalize.rs)│    │ (wire shape) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ ProductLookup │◄───│ snake_case →  │◄───│ ProductDto   │  │   │
//! │  │   │ OrderProcessor│    │ camelCase,    │    │ PageDto<T>   │  │   │
//! │  │   │ ...           │    │ floats → cents│    │ ...          │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   memory.rs: in-memory implementations for tests and the demo  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Backend REST services (excluded; reached through the traits)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`dto`] - snake_case wire payload shapes
//! - [`transform`] - the ONE normalization layer (floats → cents, defaults)
//! - [`services`] - async collaborator traits + [`services::OrderAck`]
//! - [`memory`] - in-memory reference implementations
//! - [`error`] - collaborator error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vesta_client::memory::InMemoryCatalog;
//! use vesta_client::services::{ListQuery, ProductLookup};
//!
//! let catalog: Arc<dyn ProductLookup> = Arc::new(InMemoryCatalog::with_products(seed));
//! let page = catalog.search(&ListQuery::search("coke")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod memory;
pub mod services;
pub mod transform;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ServiceError, ServiceResult};
pub use services::{
    CustomerLookup, ListQuery, OrderAck, OrderProcessor, PaymentTypeLookup, ProductLookup,
    SalesAgentLookup,
};
pub use transform::Page;
