//! # Wire DTOs
//!
//! The backend's snake_case payload shapes, exactly as shipped.
//!
//! ## Normalization Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payload Normalization                                │
//! │                                                                         │
//! │  Backend JSON (snake_case,          Domain types (camelCase,           │
//! │  floats, optional flags)            integer cents, required fields)    │
//! │                                                                         │
//! │  {                                  Product {                           │
//! │    "id": "...",                       id,                               │
//! │    "product_code": "...",     ──►     code,                             │
//! │    "sale_price": 10.99,               price_cents: 1099,                │
//! │    "tax_percentage": 18.0,            tax_rate_bps: 1800,               │
//! │    "is_active": true                  is_active,                        │
//! │  }                                  }                                   │
//! │                                                                         │
//! │  Every fallback (missing flag, unset display order, absent image)      │
//! │  is resolved HERE, in transform.rs - nowhere else.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These structs are deliberately permissive (`#[serde(default)]` on every
//! field the backend has been seen to omit); the transform layer turns them
//! into strict domain values.

use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// Product record as the catalog service ships it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: String,
    #[serde(default)]
    pub product_code: String,
    pub product_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Sale price in major units (the backend speaks decimal).
    #[serde(default)]
    pub sale_price: f64,
    /// Tax percentage (18.0 = 18%).
    #[serde(default)]
    pub tax_percentage: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// =============================================================================
// Payment Type
// =============================================================================

/// Payment method record as the lookup service ships it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTypeDto {
    pub id: String,
    pub payment_type_name: String,
    #[serde(default)]
    pub payment_type_code: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub used_in_sales: bool,
    #[serde(default)]
    pub used_in_debtor_payments: bool,
    /// Ascending sort priority; absent means "sort last".
    #[serde(default)]
    pub order_of_display: Option<u32>,
}

// =============================================================================
// Customer & Sales Agent
// =============================================================================

/// Customer record as the directory service ships it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDto {
    pub id: String,
    pub customer_name: String,
    /// Prepaid deposit balance in major units.
    #[serde(default)]
    pub deposit_amount: f64,
    #[serde(default)]
    pub loyalty_points: i64,
}

/// Sales agent record as the directory service ships it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesAgentDto {
    pub id: String,
    pub agent_name: String,
}

// =============================================================================
// Pagination
// =============================================================================

/// Paginated envelope as every lookup service ships it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDto<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub total: u64,
}

fn default_true() -> bool {
    true
}

fn default_page() -> u32 {
    1
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_dto_defaults() {
        // the backend omits image_url, code, and is_active on legacy rows
        let json = r#"{"id":"p-1","product_name":"Coke","sale_price":10.99,"tax_percentage":18.0}"#;
        let dto: ProductDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.product_code, "");
        assert!(dto.image_url.is_none());
        assert!(dto.is_active);
    }

    #[test]
    fn test_payment_type_dto_defaults() {
        let json = r#"{"id":"pt-1","payment_type_name":"Cash"}"#;
        let dto: PaymentTypeDto = serde_json::from_str(json).unwrap();
        assert!(dto.is_active);
        assert!(!dto.used_in_sales);
        assert_eq!(dto.order_of_display, None);
    }

    #[test]
    fn test_page_dto_defaults() {
        let json = r#"{}"#;
        let page: PageDto<ProductDto> = serde_json::from_str(json).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total, 0);
    }
}
