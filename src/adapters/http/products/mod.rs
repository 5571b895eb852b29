//! HTTP adapter for the product catalog.
//!
//! - `GET /api/products` - Paginated listing
//! - `GET /api/products/:id` - Single product
//! - `GET /api/products/categories/:category_id` - Products in a category
//! - `POST /api/products` - Create (admin)
//! - `PUT /api/products/:id` - Full update (admin)
//! - `DELETE /api/products/:id` - Delete (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ProductAppState;
pub use routes::product_routes;
