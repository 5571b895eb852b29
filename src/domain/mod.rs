//! Domain layer containing business rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, pagination, auth, errors)
//! - `user` - Accounts, credentials and email verification
//! - `product` - Catalog products and categories
//! - `payment` - Payment records and gateway callbacks

pub mod foundation;
pub mod payment;
pub mod product;
pub mod user;
