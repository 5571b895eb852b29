//! Payment repository port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::{Payment, PaymentStatus, StatusChange};

/// Repository port for payment records.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Payment>, DomainError>;

    /// Persist a status change, but only while the payment is still in
    /// `expected`. Returns `None` if the payment is absent or its status has
    /// moved on since it was read.
    async fn apply_status_change(
        &self,
        external_id: &str,
        expected: PaymentStatus,
        change: &StatusChange,
    ) -> Result<Option<Payment>, DomainError>;
}
