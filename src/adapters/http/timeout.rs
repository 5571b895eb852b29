//! Deadline for service calls made by handlers.

use std::future::Future;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Default deadline applied to each service call.
pub const DEFAULT_SERVICE_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs `operation` with a deadline.
///
/// When the deadline passes first the operation is dropped, which cancels any
/// in-flight work it owns, and a `Timeout` error is returned in the caller's
/// error type.
pub async fn bounded<T, E, F>(limit: Duration, operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DomainError>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "Service call timed out");
            Err(DomainError::new(
                ErrorCode::Timeout,
                format!("operation timed out after {}ms", limit.as_millis()),
            )
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductError;

    #[tokio::test]
    async fn passes_through_results_within_deadline() {
        let result: Result<u32, ProductError> =
            bounded(Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(result, Ok(7));

        let result: Result<u32, ProductError> =
            bounded(Duration::from_secs(1), async { Err(ProductError::InvalidId) }).await;
        assert_eq!(result, Err(ProductError::InvalidId));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_operation_becomes_timeout_error() {
        let result: Result<u32, ProductError> = bounded(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        })
        .await;

        match result {
            Err(ProductError::Infrastructure(message)) => assert!(message.contains("TIMEOUT")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
