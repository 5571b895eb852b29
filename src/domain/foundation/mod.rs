//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, pagination, authentication and error types
//! that form the vocabulary of the marketplace domain.

mod auth;
mod errors;
mod ids;
mod pagination;

pub use auth::{AuthError, AuthenticatedUser, ADMIN_ROLE};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CategoryId, ProductId, UserId};
pub use pagination::{Page, PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
