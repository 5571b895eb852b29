//! HTTP handlers for product catalog endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::timeout::bounded;
use crate::domain::foundation::{CategoryId, ProductId};
use crate::domain::product::ProductError;
use crate::ports::ProductService;

use super::dto::{
    CategoryProductsResponse, PageQuery, ProductDeletedResponse, ProductListResponse,
    ProductRequest, ProductResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// State shared by the product handlers.
#[derive(Clone)]
pub struct ProductAppState {
    pub product_service: Arc<dyn ProductService>,
    /// Deadline for each service call.
    pub timeout: Duration,
}

fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse().map_err(|_| ApiError::validation("invalid product id"))
}

fn infrastructure(operation: &str, err: ProductError) -> ApiError {
    tracing::error!(error = %err, operation, "Product service failed");
    ApiError::upstream(format!("failed to {}", operation))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/products?page=&limit=
pub async fn get_all_products(
    State(state): State<ProductAppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let page_request = query.map(|Query(q)| q).unwrap_or_default().to_request();

    let page = bounded(state.timeout, state.product_service.list_page(page_request))
        .await
        .map_err(|e| infrastructure("get products", e))?;

    let total_pages = page.total_pages(&page_request);
    Ok(Json(ProductListResponse {
        message: "successfully get all products".to_string(),
        products: page.items,
        page: page_request.page(),
        limit: page_request.limit(),
        total_items: page.total_items,
        total_pages,
    }))
}

/// GET /api/products/categories/:category_id
pub async fn get_products_by_category(
    State(state): State<ProductAppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let category_id: CategoryId = raw_id
        .parse()
        .map_err(|_| ApiError::validation("invalid category id"))?;

    let products = bounded(
        state.timeout,
        state.product_service.list_by_category(category_id),
    )
    .await
    .map_err(|e| match e {
        ProductError::InvalidCategory(_) => ApiError::validation(e.message()),
        other => infrastructure("get products by category", other),
    })?;

    Ok(Json(CategoryProductsResponse {
        message: "successfully get products by category".to_string(),
        category_id,
        total: products.len(),
        products,
    }))
}

/// GET /api/products/:id
pub async fn get_product_by_id(
    State(state): State<ProductAppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_product_id(&raw_id)?;

    let product = bounded(state.timeout, state.product_service.get_by_id(id))
        .await
        .map_err(|e| match e {
            ProductError::NotFound(_) | ProductError::InvalidId => {
                ApiError::validation(e.message())
            }
            other => infrastructure("get product", other),
        })?;

    Ok(Json(ProductResponse {
        message: "successfully find product by id".to_string(),
        product,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (admin only)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/products
pub async fn create_product(
    State(state): State<ProductAppState>,
    RequireAuth(admin): RequireAuth,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let draft = request.into_draft()?;

    let product = bounded(state.timeout, state.product_service.create(draft))
        .await
        .map_err(|e| match e {
            ProductError::Validation(err) => ApiError::from(err),
            ProductError::InvalidCategory(_) => ApiError::validation(e.message()),
            other => infrastructure("create product", other),
        })?;

    tracing::info!(admin_id = %admin.id, product_id = %product.id, "Admin created product");
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "Product successfully created".to_string(),
            product,
        }),
    ))
}

/// PUT /api/products/:id
pub async fn update_product(
    State(state): State<ProductAppState>,
    RequireAuth(admin): RequireAuth,
    Path(raw_id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_product_id(&raw_id)?;
    let Json(request) = payload?;
    let draft = request.into_draft()?;

    let product = bounded(state.timeout, state.product_service.update(id, draft))
        .await
        .map_err(|e| match e {
            ProductError::NotFound(_) => ApiError::not_found(e.message()),
            ProductError::Validation(err) => ApiError::from(err),
            ProductError::InvalidId | ProductError::InvalidCategory(_) => {
                ApiError::validation(e.message())
            }
            other => infrastructure("update product", other),
        })?;

    tracing::info!(admin_id = %admin.id, product_id = %id, "Admin updated product");
    Ok(Json(ProductResponse {
        message: "successfully update product".to_string(),
        product,
    }))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<ProductAppState>,
    RequireAuth(admin): RequireAuth,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_product_id(&raw_id)?;

    bounded(state.timeout, state.product_service.delete(id))
        .await
        .map_err(|e| match e {
            ProductError::NotFound(_) | ProductError::InvalidId => {
                ApiError::not_found(e.message())
            }
            other => infrastructure("delete product", other),
        })?;

    tracing::info!(admin_id = %admin.id, product_id = %id, "Admin deleted product");
    Ok(Json(ProductDeletedResponse {
        message: "product successfully deleted".to_string(),
        product_id: id,
    }))
}
