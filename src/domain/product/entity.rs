//! Product entity.
//!
//! # Invariants
//!
//! - `normal_price > 0`
//! - `sale_price >= 0`
//! - `0 <= discount <= 100`
//! - `quantity >= 0`
//! - name, category label and unit are non-blank
//!
//! The same rules are enforced by CHECK constraints in the schema.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::foundation::{CategoryId, ProductId, ValidationError};

/// A catalog product as persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "product_skuid")]
    pub sku_id: i64,
    pub category_id: CategoryId,
    pub is_green_tag: bool,
    #[serde(rename = "product_name")]
    pub name: String,
    #[serde(rename = "product_category")]
    pub category: String,
    pub unit: String,
    pub normal_price: f64,
    pub sale_price: f64,
    pub discount: f64,
    pub quantity: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable product fields, shared by create and full update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub sku_id: i64,
    pub category_id: CategoryId,
    pub is_green_tag: bool,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub normal_price: f64,
    pub sale_price: f64,
    pub discount: f64,
    pub quantity: f64,
}

impl ProductDraft {
    /// Checks the field rules, reporting the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("product_name"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::empty_field("product_category"));
        }
        if self.unit.trim().is_empty() {
            return Err(ValidationError::empty_field("unit"));
        }
        if !(self.normal_price > 0.0) {
            return Err(ValidationError::out_of_range(
                "normal_price",
                "must be greater than 0",
            ));
        }
        if !(self.sale_price >= 0.0) {
            return Err(ValidationError::out_of_range("sale_price", "cannot be negative"));
        }
        if !(0.0..=100.0).contains(&self.discount) {
            return Err(ValidationError::out_of_range(
                "discount",
                "must be between 0 and 100",
            ));
        }
        if !(self.quantity >= 0.0) {
            return Err(ValidationError::out_of_range("quantity", "cannot be negative"));
        }
        if self.sku_id < 0 {
            return Err(ValidationError::out_of_range("product_skuid", "cannot be negative"));
        }
        Ok(())
    }

    /// Materializes the record the way the database would return it.
    pub fn into_product(
        self,
        id: ProductId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Product {
        Product {
            id,
            sku_id: self.sku_id,
            category_id: self.category_id,
            is_green_tag: self.is_green_tag,
            name: self.name,
            category: self.category,
            unit: self.unit,
            normal_price: self.normal_price,
            sale_price: self.sale_price,
            discount: self.discount,
            quantity: self.quantity,
            created_at,
            updated_at,
        }
    }
}
