use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;

use super::lock_poisoned;
use crate::domain::foundation::{CategoryId, DomainError, Page, PageRequest, ProductId};
use crate::domain::product::{Category, Product, ProductDraft};
use crate::ports::{CategoryRepository, ProductRepository};

/// In-memory products, kept ordered by id.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a product from a draft, assigning the next id.
    pub fn with_product(self, draft: ProductDraft) -> Self {
        if let Ok(mut products) = self.products.write() {
            let id = next_id(&products);
            let now = Utc::now();
            products.push(draft.into_product(id, now, now));
        }
        self
    }
}

fn next_id(products: &[Product]) -> ProductId {
    ProductId::new(products.iter().map(|p| p.id.value()).max().unwrap_or(0) + 1)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_page(&self, page: &PageRequest) -> Result<Page<Product>, DomainError> {
        let products = self.products.read().map_err(lock_poisoned)?;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = products
            .iter()
            .skip(offset)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(Page::new(items, products.len() as i64))
    }

    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().map_err(lock_poisoned)?;
        Ok(products
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().map_err(lock_poisoned)?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, draft: &ProductDraft) -> Result<Product, DomainError> {
        let mut products = self.products.write().map_err(lock_poisoned)?;
        let now = Utc::now();
        let product = draft.clone().into_product(next_id(&products), now, now);
        products.push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, DomainError> {
        let mut products = self.products.write().map_err(lock_poisoned)?;
        let Some(existing) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        *existing = draft.clone().into_product(id, existing.created_at, Utc::now());
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, DomainError> {
        let mut products = self.products.write().map_err(lock_poisoned)?;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

/// In-memory categories.
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(self, id: i64, label: &str) -> Self {
        if let Ok(mut categories) = self.categories.write() {
            categories.push(Category {
                id: CategoryId::new(id),
                label: label.to_string(),
                created_at: Utc::now(),
            });
        }
        self
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, DomainError> {
        let categories = self.categories.read().map_err(lock_poisoned)?;
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }
}
