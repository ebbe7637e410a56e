//! # Collaborator Traits
//!
//! The async interfaces the session consumes. Each collaborator is a black
//! box behind one of these traits; the session never sees a wire payload or
//! an HTTP status, only normalized domain values and [`ServiceError`]s.
//!
//! ## Dependency Injection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Collaborator Wiring                                  │
//! │                                                                         │
//! │  PosSession::new(                                                       │
//! │      Arc<dyn ProductLookup>,      ◄── REST client in production,       │
//! │      Arc<dyn CustomerLookup>,         in-memory fake in tests and      │
//! │      Arc<dyn SalesAgentLookup>,       the demo binary                  │
//! │      Arc<dyn PaymentTypeLookup>,                                        │
//! │      Arc<dyn OrderProcessor>,                                           │
//! │  )                                                                      │
//! │                                                                         │
//! │  No ambient context, no global query cache: a session can be built     │
//! │  in a unit test from five fakes and nothing else.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vesta_core::types::{Customer, OrderDraft, PaymentType, Product, SalesAgent};

use crate::error::ServiceResult;
use crate::transform::Page;

// =============================================================================
// Lookup Query
// =============================================================================

/// Common filter/pagination input for the lookup collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery {
    /// Free-text filter; empty means "all".
    pub search: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            search: None,
            page: 1,
            per_page: 20,
        }
    }
}

impl ListQuery {
    /// A query filtering by free text, first page.
    pub fn search(text: impl Into<String>) -> Self {
        ListQuery {
            search: Some(text.into()),
            ..Default::default()
        }
    }
}

// =============================================================================
// Lookup Traits
// =============================================================================

/// Product catalog lookup.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Searches the catalog, paginated.
    async fn search(&self, query: &ListQuery) -> ServiceResult<Page<Product>>;

    /// Fetches one product by id; `None` when it does not exist.
    async fn get(&self, id: &str) -> ServiceResult<Option<Product>>;
}

/// Customer directory lookup.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    async fn search(&self, query: &ListQuery) -> ServiceResult<Page<Customer>>;
    async fn get(&self, id: &str) -> ServiceResult<Option<Customer>>;
}

/// Sales agent directory lookup.
#[async_trait]
pub trait SalesAgentLookup: Send + Sync {
    async fn search(&self, query: &ListQuery) -> ServiceResult<Page<SalesAgent>>;
    async fn get(&self, id: &str) -> ServiceResult<Option<SalesAgent>>;
}

/// Payment type lookup.
#[async_trait]
pub trait PaymentTypeLookup: Send + Sync {
    /// The payment types eligible for sales checkout, already filtered to
    /// active sales types and priority-sorted (see `transform`).
    async fn list_for_sales(&self) -> ServiceResult<Vec<PaymentType>>;
}

// =============================================================================
// Order Processing
// =============================================================================

/// Acknowledgement from the order processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    /// Backend-assigned order id.
    pub order_id: String,
    /// Receipt number, echoed or reassigned by the backend.
    pub receipt_number: String,
}

/// Accepts the assembled transaction. The core hands the draft over and
/// reports success or failure to the user; it never inspects what the
/// processor does internally.
#[async_trait]
pub trait OrderProcessor: Send + Sync {
    async fn submit(&self, draft: &OrderDraft) -> ServiceResult<OrderAck>;
}
