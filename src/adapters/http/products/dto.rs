//! Request and response bodies for the product endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, PageRequest, ProductId, ValidationError};
use crate::domain::product::{Product, ProductDraft};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Raw `?page=&limit=` values. Kept as strings so bad input falls back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub product_skuid: i64,
    #[serde(default)]
    pub category_id: i64,
    #[serde(default)]
    pub is_green_tag: bool,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_category: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub normal_price: f64,
    #[serde(default)]
    pub sale_price: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub quantity: f64,
}

impl ProductRequest {
    /// Converts to a draft, rejecting it if any field rule fails.
    pub fn into_draft(self) -> Result<ProductDraft, ValidationError> {
        let draft = ProductDraft {
            sku_id: self.product_skuid,
            category_id: CategoryId::new(self.category_id),
            is_green_tag: self.is_green_tag,
            name: self.product_name,
            category: self.product_category,
            unit: self.unit,
            normal_price: self.normal_price,
            sale_price: self.sale_price,
            discount: self.discount,
            quantity: self.quantity,
        };
        draft.validate()?;
        Ok(draft)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub message: String,
    pub products: Vec<Product>,
    pub page: u32,
    pub limit: u32,
    pub total_items: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct CategoryProductsResponse {
    pub message: String,
    pub category_id: CategoryId,
    pub products: Vec<Product>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub message: String,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct ProductDeletedResponse {
    pub message: String,
    pub product_id: ProductId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProductRequest {
        serde_json::from_value(serde_json::json!({
            "product_skuid": 2001,
            "category_id": 1,
            "is_green_tag": true,
            "product_name": "Kale",
            "product_category": "Vegetables",
            "unit": "bunch",
            "normal_price": 10.0,
            "sale_price": 9.0,
            "discount": 10.0,
            "quantity": 5
        }))
        .unwrap()
    }

    #[test]
    fn wire_names_map_onto_draft() {
        let draft = request().into_draft().unwrap();
        assert_eq!(draft.sku_id, 2001);
        assert_eq!(draft.category_id, CategoryId::new(1));
        assert_eq!(draft.name, "Kale");
        assert_eq!(draft.quantity, 5.0);
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut req = request();
        req.product_name = String::new();
        assert_eq!(req.into_draft(), Err(ValidationError::empty_field("product_name")));
    }

    #[test]
    fn discount_above_hundred_is_rejected() {
        let mut req = request();
        req.discount = 100.5;
        assert!(matches!(
            req.into_draft(),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "discount"
        ));
    }

    #[test]
    fn page_query_falls_back_to_defaults() {
        let query = PageQuery {
            page: Some("-3".to_string()),
            limit: Some("500".to_string()),
        };
        assert_eq!(query.to_request(), PageRequest::default());
    }
}
