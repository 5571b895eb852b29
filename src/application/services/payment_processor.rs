//! PaymentProcessor - applies gateway invoice callbacks to payment records.
//!
//! Gateways deliver at least once and may reorder callbacks. A repeated
//! status is a no-op, and a payment that already reached a final state only
//! accepts `PAID -> SETTLED`; any other late callback is logged and ignored.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::payment::{PaymentError, PaymentNotification, PaymentStatus, StatusChange};
use crate::ports::{PaymentRepository, PaymentsService};

/// `PaymentsService` backed by a payment repository.
pub struct PaymentProcessor {
    payments: Arc<dyn PaymentRepository>,
}

impl PaymentProcessor {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Attempts before a callback that keeps losing to concurrent deliveries
/// gives up.
const MAX_APPLY_ATTEMPTS: usize = 3;

#[async_trait]
impl PaymentsService for PaymentProcessor {
    async fn receive_payment_webhook(
        &self,
        notification: PaymentNotification,
    ) -> Result<(), PaymentError> {
        let external_id = notification.external_id.trim();
        if external_id.is_empty() {
            return Err(PaymentError::MissingExternalId);
        }
        let status: PaymentStatus = notification.status.parse()?;

        // The write is conditional on the status read here. When another
        // delivery wins in between, re-read and decide again.
        for _ in 0..MAX_APPLY_ATTEMPTS {
            let payment = self
                .payments
                .find_by_external_id(external_id)
                .await?
                .ok_or_else(|| PaymentError::NotFound(external_id.to_string()))?;

            if payment.amount != notification.amount {
                tracing::warn!(
                    external_id,
                    expected = payment.amount,
                    received = notification.amount,
                    "Payment callback amount mismatch"
                );
                return Err(PaymentError::AmountMismatch {
                    expected: payment.amount,
                    received: notification.amount,
                });
            }

            if payment.status == status {
                tracing::debug!(external_id, status = %status, "Duplicate payment callback ignored");
                return Ok(());
            }

            if !payment.status.can_transition_to(&status) {
                tracing::warn!(
                    external_id,
                    current = %payment.status,
                    received = %status,
                    "Out-of-order payment callback ignored"
                );
                return Ok(());
            }

            let paid_at = status
                .is_paid()
                .then(|| payment.paid_at.or(notification.updated).unwrap_or_else(Utc::now));

            let change = StatusChange {
                status,
                payment_method: non_blank(&notification.payment_method),
                payment_channel: non_blank(&notification.payment_channel),
                paid_at,
            };

            if self
                .payments
                .apply_status_change(external_id, payment.status, &change)
                .await?
                .is_some()
            {
                tracing::info!(
                    external_id,
                    from = %payment.status,
                    to = %status,
                    transaction_id = %notification.transaction_id,
                    "Payment status updated"
                );
                return Ok(());
            }

            tracing::debug!(
                external_id,
                read = %payment.status,
                received = %status,
                "Payment changed concurrently, re-reading"
            );
        }

        Err(PaymentError::Infrastructure(format!(
            "payment {} kept changing concurrently",
            external_id
        )))
    }
}
