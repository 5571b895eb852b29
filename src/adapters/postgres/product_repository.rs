//! PostgreSQL implementations of ProductRepository and CategoryRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{CategoryId, DomainError, Page, PageRequest, ProductId};
use crate::domain::product::{Category, Product, ProductDraft};
use crate::ports::{CategoryRepository, ProductRepository};

/// PostgreSQL implementation of the ProductRepository port.
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    product_skuid: i64,
    category_id: i64,
    is_green_tag: bool,
    product_name: String,
    product_category: String,
    unit: String,
    normal_price: f64,
    sale_price: f64,
    discount: f64,
    quantity: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            sku_id: row.product_skuid,
            category_id: CategoryId::new(row.category_id),
            is_green_tag: row.is_green_tag,
            name: row.product_name,
            category: row.product_category,
            unit: row.unit,
            normal_price: row.normal_price,
            sale_price: row.sale_price,
            discount: row.discount,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, product_skuid, category_id, is_green_tag, product_name, \
     product_category, unit, normal_price, sale_price, discount, quantity, created_at, updated_at";

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn list_page(&self, page: &PageRequest) -> Result<Page<Product>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to count products", e))?;

        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(page.limit()))
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list products", e))?;

        Ok(Page::new(rows.into_iter().map(Product::from).collect(), total))
    }

    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, DomainError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = $1 ORDER BY id ASC"
        ))
        .bind(category_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list products by category", e))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find product", e))?;

        Ok(row.map(Product::from))
    }

    async fn insert(&self, draft: &ProductDraft) -> Result<Product, DomainError> {
        let row: ProductRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO products (
                product_skuid, category_id, is_green_tag, product_name, product_category,
                unit, normal_price, sale_price, discount, quantity
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(draft.sku_id)
        .bind(draft.category_id.value())
        .bind(draft.is_green_tag)
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(&draft.unit)
        .bind(draft.normal_price)
        .bind(draft.sale_price)
        .bind(draft.discount)
        .bind(draft.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to create product", e))?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, DomainError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            r#"
            UPDATE products SET
                product_skuid = $2,
                category_id = $3,
                is_green_tag = $4,
                product_name = $5,
                product_category = $6,
                unit = $7,
                normal_price = $8,
                sale_price = $9,
                discount = $10,
                quantity = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id.value())
        .bind(draft.sku_id)
        .bind(draft.category_id.value())
        .bind(draft.is_green_tag)
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(&draft.unit)
        .bind(draft.normal_price)
        .bind(draft.sale_price)
        .bind(draft.discount)
        .bind(draft.quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update product", e))?;

        Ok(row.map(Product::from))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete product", e))?;

        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL implementation of the CategoryRepository port.
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    category_id: i64,
    product_category: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            "SELECT category_id, product_category, created_at FROM categories WHERE category_id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find category", e))?;

        Ok(row.map(|row| Category {
            id: CategoryId::new(row.category_id),
            label: row.product_category,
            created_at: row.created_at,
        }))
    }
}
