//! Product service port consumed by the product HTTP handlers.

use async_trait::async_trait;

use crate::domain::foundation::{CategoryId, Page, PageRequest, ProductId};
use crate::domain::product::{Product, ProductDraft, ProductError};

/// Catalog operations.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn list_page(&self, page: PageRequest) -> Result<Page<Product>, ProductError>;

    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, ProductError>;

    async fn get_by_id(&self, id: ProductId) -> Result<Product, ProductError>;

    async fn create(&self, draft: ProductDraft) -> Result<Product, ProductError>;

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, ProductError>;

    async fn delete(&self, id: ProductId) -> Result<(), ProductError>;
}
