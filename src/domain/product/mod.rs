//! Product catalog domain module.
//!
//! # Module Structure
//!
//! - `entity` - Product entity and the validated draft used for create/update
//! - `category` - Category lookup entity
//! - `errors` - ProductError returned by the product service port

mod category;
mod errors;
mod entity;

pub use category::Category;
pub use errors::ProductError;
pub use entity::{Product, ProductDraft};
