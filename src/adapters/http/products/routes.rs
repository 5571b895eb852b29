//! Axum router configuration for product endpoints.

use axum::{
    middleware,
    routing::{get, post, put, MethodRouter},
    Router,
};

use crate::adapters::http::middleware::{admin_only, auth_middleware, AuthState};

use super::handlers::{
    create_product, delete_product, get_all_products, get_product_by_id,
    get_products_by_category, update_product, ProductAppState,
};

/// Create the product API router, mounted at `/api/products`.
///
/// # Routes
///
/// ## Public
/// - `GET /` - Paginated listing
/// - `GET /:id` - Single product
/// - `GET /categories/:category_id` - Products in a category
///
/// ## Admin (bearer token with admin role)
/// - `POST /` - Create
/// - `PUT /:id` - Full update
/// - `DELETE /:id` - Delete
pub fn product_routes(auth: AuthState) -> Router<ProductAppState> {
    Router::new()
        .route(
            "/",
            get(get_all_products).merge(admin(post(create_product), &auth)),
        )
        .route(
            "/:id",
            get(get_product_by_id).merge(admin(
                put(update_product).delete(delete_product),
                &auth,
            )),
        )
        .route("/categories/:category_id", get(get_products_by_category))
}

/// Guards only the given methods, leaving the public methods on the same
/// path untouched.
fn admin(
    methods: MethodRouter<ProductAppState>,
    auth: &AuthState,
) -> MethodRouter<ProductAppState> {
    methods
        .route_layer(middleware::from_fn(admin_only))
        .route_layer(middleware::from_fn_with_state(auth.clone(), auth_middleware))
}
