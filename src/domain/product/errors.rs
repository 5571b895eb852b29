//! Product-catalog error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | Get by id | Update | Delete |
//! |-------|-----------|--------|--------|
//! | NotFound | 400 | 404 | 404 |
//! | InvalidId | 400 | 400 | 404 |
//! | InvalidCategory | 400 | 400 | - |
//! | Validation | - | 400 | - |
//! | Infrastructure | 500 | 500 | 500 |

use thiserror::Error;

use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, ProductId, ValidationError};

/// Errors returned by the product service port.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductError {
    /// No product with this id.
    #[error("product not found")]
    NotFound(ProductId),

    /// Id zero is never assigned.
    #[error("invalid product id")]
    InvalidId,

    /// Category id is zero or unknown.
    #[error("invalid category id")]
    InvalidCategory(CategoryId),

    /// Draft failed a field rule.
    #[error("{0}")]
    Validation(ValidationError),

    /// Storage or timeout failure.
    #[error("{0}")]
    Infrastructure(String),
}

impl ProductError {
    pub fn not_found(id: ProductId) -> Self {
        ProductError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProductError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProductError::NotFound(_) => ErrorCode::NotFound,
            ProductError::InvalidId
            | ProductError::InvalidCategory(_)
            | ProductError::Validation(_) => ErrorCode::ValidationFailed,
            ProductError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a client-facing error message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<ValidationError> for ProductError {
    fn from(err: ValidationError) -> Self {
        ProductError::Validation(err)
    }
}

impl From<DomainError> for ProductError {
    fn from(err: DomainError) -> Self {
        ProductError::Infrastructure(err.to_string())
    }
}
