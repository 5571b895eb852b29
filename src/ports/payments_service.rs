//! Payments service port consumed by the webhook handler.

use async_trait::async_trait;

use crate::domain::payment::{PaymentError, PaymentNotification};

/// Applies gateway callbacks to payment records.
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Apply one callback. Redelivery of an already-applied status is a no-op.
    async fn receive_payment_webhook(
        &self,
        notification: PaymentNotification,
    ) -> Result<(), PaymentError>;
}
