//! Product and category repository ports.

use async_trait::async_trait;

use crate::domain::foundation::{CategoryId, DomainError, Page, PageRequest, ProductId};
use crate::domain::product::{Category, Product, ProductDraft};

/// Repository port for catalog products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of products ordered by id, plus the total count.
    async fn list_page(&self, page: &PageRequest) -> Result<Page<Product>, DomainError>;

    /// All products in a category, ordered by id.
    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, DomainError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError>;

    /// Insert a validated draft and return the stored product.
    async fn insert(&self, draft: &ProductDraft) -> Result<Product, DomainError>;

    /// Overwrite all writable fields. Returns `None` if the product is absent.
    async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, DomainError>;

    /// Returns `false` if the product is absent.
    async fn delete(&self, id: ProductId) -> Result<bool, DomainError>;
}

/// Read-only lookup of product categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, DomainError>;
}
