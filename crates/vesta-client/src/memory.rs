//! # In-Memory Collaborators
//!
//! Reference implementations of every collaborator trait, backed by plain
//! vectors. They power the test suites and the `demo` binary; production
//! wires real REST clients behind the same traits.
//!
//! The payment-type fake deliberately stores *wire* DTOs and runs the real
//! transform on every call, so the filter/sort contract is exercised by
//! everything built on top of it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use vesta_core::types::{Customer, OrderDraft, PaymentType, Product, SalesAgent};

use crate::dto::PaymentTypeDto;
use crate::error::{ServiceError, ServiceResult};
use crate::services::{
    CustomerLookup, ListQuery, OrderAck, OrderProcessor, PaymentTypeLookup, ProductLookup,
    SalesAgentLookup,
};
use crate::transform::{sales_payment_types_from_wire, Page};

// =============================================================================
// Pagination Helper
// =============================================================================

fn paginate<T: Clone>(items: &[T], query: &ListQuery) -> Page<T> {
    let per_page = query.per_page.max(1) as usize;
    let page = query.page.max(1);
    let start = (page as usize - 1) * per_page;
    let slice = items
        .iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect::<Vec<_>>();
    Page {
        items: slice,
        page,
        total: items.len() as u64,
    }
}

fn matches(haystacks: &[&str], query: &ListQuery) -> bool {
    match query.search.as_deref() {
        None | Some("") => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// In-memory product catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn with_products(products: Vec<Product>) -> Self {
        InMemoryCatalog { products }
    }
}

#[async_trait]
impl ProductLookup for InMemoryCatalog {
    async fn search(&self, query: &ListQuery) -> ServiceResult<Page<Product>> {
        debug!(search = ?query.search, page = query.page, "catalog search");
        let hits: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.is_active && matches(&[&p.name, &p.code], query))
            .cloned()
            .collect();
        Ok(paginate(&hits, query))
    }

    async fn get(&self, id: &str) -> ServiceResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}

// =============================================================================
// Directory (Customers & Agents)
// =============================================================================

/// In-memory customer and sales-agent directory.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    customers: Vec<Customer>,
    agents: Vec<SalesAgent>,
}

impl InMemoryDirectory {
    pub fn new(customers: Vec<Customer>, agents: Vec<SalesAgent>) -> Self {
        InMemoryDirectory { customers, agents }
    }
}

#[async_trait]
impl CustomerLookup for InMemoryDirectory {
    async fn search(&self, query: &ListQuery) -> ServiceResult<Page<Customer>> {
        let hits: Vec<Customer> = self
            .customers
            .iter()
            .filter(|c| matches(&[&c.name], query))
            .cloned()
            .collect();
        Ok(paginate(&hits, query))
    }

    async fn get(&self, id: &str) -> ServiceResult<Option<Customer>> {
        Ok(self.customers.iter().find(|c| c.id == id).cloned())
    }
}

#[async_trait]
impl SalesAgentLookup for InMemoryDirectory {
    async fn search(&self, query: &ListQuery) -> ServiceResult<Page<SalesAgent>> {
        let hits: Vec<SalesAgent> = self
            .agents
            .iter()
            .filter(|a| matches(&[&a.name], query))
            .cloned()
            .collect();
        Ok(paginate(&hits, query))
    }

    async fn get(&self, id: &str) -> ServiceResult<Option<SalesAgent>> {
        Ok(self.agents.iter().find(|a| a.id == id).cloned())
    }
}

// =============================================================================
// Payment Types
// =============================================================================

/// In-memory payment type list, held in wire shape so every call exercises
/// the real normalization path.
#[derive(Debug, Default)]
pub struct InMemoryPaymentTypes {
    raw: Vec<PaymentTypeDto>,
}

impl InMemoryPaymentTypes {
    pub fn with_wire_types(raw: Vec<PaymentTypeDto>) -> Self {
        InMemoryPaymentTypes { raw }
    }
}

#[async_trait]
impl PaymentTypeLookup for InMemoryPaymentTypes {
    async fn list_for_sales(&self) -> ServiceResult<Vec<PaymentType>> {
        Ok(sales_payment_types_from_wire(self.raw.clone()))
    }
}

// =============================================================================
// Order Processor
// =============================================================================

/// Order processor that records every submitted draft.
///
/// `fail_next` makes the next submission fail once - enough to test the
/// "failed submission returns the user to the editable cart" rule without
/// a real backend.
#[derive(Debug, Default)]
pub struct RecordingOrderProcessor {
    submitted: Mutex<Vec<OrderDraft>>,
    fail_next: AtomicBool,
}

impl RecordingOrderProcessor {
    pub fn new() -> Self {
        RecordingOrderProcessor::default()
    }

    /// Makes the next `submit` call fail with `ServiceError::Unavailable`.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Drafts accepted so far, in submission order.
    pub fn submitted(&self) -> Vec<OrderDraft> {
        self.submitted.lock().expect("processor mutex poisoned").clone()
    }
}

#[async_trait]
impl OrderProcessor for RecordingOrderProcessor {
    async fn submit(&self, draft: &OrderDraft) -> ServiceResult<OrderAck> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ServiceError::Unavailable(
                "order service unreachable".into(),
            ));
        }

        debug!(order_id = %draft.id, total = draft.total_cents, "order accepted");
        self.submitted
            .lock()
            .expect("processor mutex poisoned")
            .push(draft.clone());

        Ok(OrderAck {
            order_id: Uuid::new_v4().to_string(),
            receipt_number: draft.receipt_number.clone(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, active: bool) -> Product {
        Product {
            id: id.to_string(),
            code: format!("SKU-{}", id),
            name: name.to_string(),
            image_url: None,
            price_cents: 1000,
            tax_rate_bps: 0,
            is_active: active,
        }
    }

    #[tokio::test]
    async fn test_catalog_search_filters_and_paginates() {
        let catalog = InMemoryCatalog::with_products(vec![
            product("1", "Coca-Cola 330ml", true),
            product("2", "Coca-Cola 1L", true),
            product("3", "Pepsi 330ml", true),
            product("4", "Coca-Cola Zero", false),
        ]);

        let page = catalog.search(&ListQuery::search("coca")).await.unwrap();
        // inactive products never surface
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 2);

        let paged = catalog
            .search(&ListQuery {
                search: None,
                page: 2,
                per_page: 2,
            })
            .await
            .unwrap();
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.items[0].id, "3");
    }

    #[tokio::test]
    async fn test_catalog_get() {
        let catalog = InMemoryCatalog::with_products(vec![product("1", "Coke", true)]);
        assert!(catalog.get("1").await.unwrap().is_some());
        assert!(catalog.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_directory_lookup() {
        let directory = InMemoryDirectory::new(
            vec![Customer {
                id: "c-1".into(),
                name: "Walk-in".into(),
                deposit_cents: 0,
                loyalty_points: 0,
            }],
            vec![SalesAgent {
                id: "a-1".into(),
                name: "Dana".into(),
            }],
        );

        let customers = CustomerLookup::search(&directory, &ListQuery::search("walk"))
            .await
            .unwrap();
        assert_eq!(customers.items.len(), 1);

        let agent = SalesAgentLookup::get(&directory, "a-1").await.unwrap();
        assert_eq!(agent.unwrap().name, "Dana");
    }

    #[tokio::test]
    async fn test_recording_processor_failure_is_one_shot() {
        let processor = RecordingOrderProcessor::new();
        processor.fail_next();

        let draft = OrderDraft {
            id: "o-1".into(),
            receipt_number: "r-1".into(),
            profile: Default::default(),
            lines: vec![],
            subtotal_cents: 0,
            discount_cents: 0,
            tax_cents: 0,
            total_cents: 100,
            payment: None,
            customer_id: None,
            sales_agent_id: None,
            created_at: chrono::Utc::now(),
        };

        assert!(processor.submit(&draft).await.is_err());
        assert!(processor.submit(&draft).await.is_ok());
        assert_eq!(processor.submitted().len(), 1);
    }
}
