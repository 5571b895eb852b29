//! ProductCatalog - listing and admin maintenance of products.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{CategoryId, Page, PageRequest, ProductId};
use crate::domain::product::{Product, ProductDraft, ProductError};
use crate::ports::{CategoryRepository, ProductRepository, ProductService};

/// `ProductService` backed by product and category repositories.
pub struct ProductCatalog {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductCatalog {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    async fn ensure_category(&self, category_id: CategoryId) -> Result<(), ProductError> {
        if !category_id.is_assigned() {
            return Err(ProductError::InvalidCategory(category_id));
        }
        match self.categories.find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(ProductError::InvalidCategory(category_id)),
        }
    }
}

fn ensure_assigned(id: ProductId) -> Result<(), ProductError> {
    if id.is_assigned() {
        Ok(())
    } else {
        Err(ProductError::InvalidId)
    }
}

#[async_trait]
impl ProductService for ProductCatalog {
    async fn list_page(&self, page: PageRequest) -> Result<Page<Product>, ProductError> {
        Ok(self.products.list_page(&page).await?)
    }

    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, ProductError> {
        self.ensure_category(category_id).await?;
        Ok(self.products.list_by_category(category_id).await?)
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, ProductError> {
        ensure_assigned(id)?;
        self.products
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, ProductError> {
        draft.validate()?;
        self.ensure_category(draft.category_id).await?;

        let product = self.products.insert(&draft).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, ProductError> {
        ensure_assigned(id)?;
        draft.validate()?;
        self.ensure_category(draft.category_id).await?;

        let product = self
            .products
            .update(id, &draft)
            .await?
            .ok_or(ProductError::NotFound(id))?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        ensure_assigned(id)?;
        if !self.products.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
