//! Payment callback error types.
//!
//! The webhook reports every variant as 500 so the gateway retries delivery.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors returned by the payments service port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Callback carried no external id.
    #[error("external_id is required")]
    MissingExternalId,

    /// Status string is not one the gateway documents.
    #[error("unknown payment status: {0}")]
    UnknownStatus(String),

    /// No payment record for this external id.
    #[error("payment not found for external_id {0}")]
    NotFound(String),

    /// Callback amount differs from the recorded amount.
    #[error("amount mismatch: expected {expected}, received {received}")]
    AmountMismatch { expected: i64, received: i64 },

    /// Storage or timeout failure.
    #[error("{0}")]
    Infrastructure(String),
}

impl PaymentError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::MissingExternalId
            | PaymentError::UnknownStatus(_)
            | PaymentError::AmountMismatch { .. } => ErrorCode::ValidationFailed,
            PaymentError::NotFound(_) => ErrorCode::NotFound,
            PaymentError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        PaymentError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_message() {
        let err = PaymentError::AmountMismatch {
            expected: 50_000,
            received: 1,
        };
        assert_eq!(err.to_string(), "amount mismatch: expected 50000, received 1");
        assert_eq!(err.message(), err.to_string());
    }

    #[test]
    fn usable_as_boxed_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(PaymentError::NotFound("order-1".to_string()));
        assert_eq!(err.to_string(), "payment not found for external_id order-1");
    }

    #[test]
    fn domain_errors_become_infrastructure() {
        let err = PaymentError::from(DomainError::new(ErrorCode::Timeout, "too slow"));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.message().contains("TIMEOUT"));
    }
}
