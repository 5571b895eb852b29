use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;

use super::lock_poisoned;
use crate::domain::foundation::DomainError;
use crate::domain::payment::{Payment, PaymentStatus, StatusChange};
use crate::ports::PaymentRepository;

/// In-memory payment records.
#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<Vec<Payment>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a pending payment, as checkout would.
    pub fn with_pending(self, external_id: &str, amount: i64) -> Self {
        if let Ok(mut payments) = self.payments.write() {
            let id = payments.len() as i64 + 1;
            payments.push(Payment {
                id,
                external_id: external_id.to_string(),
                user_id: None,
                amount,
                currency: "IDR".to_string(),
                status: PaymentStatus::Pending,
                payment_method: None,
                payment_channel: None,
                paid_at: None,
                updated_at: Utc::now(),
            });
        }
        self
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Payment>, DomainError> {
        let payments = self.payments.read().map_err(lock_poisoned)?;
        Ok(payments.iter().find(|p| p.external_id == external_id).cloned())
    }

    async fn apply_status_change(
        &self,
        external_id: &str,
        expected: PaymentStatus,
        change: &StatusChange,
    ) -> Result<Option<Payment>, DomainError> {
        let mut payments = self.payments.write().map_err(lock_poisoned)?;
        let Some(payment) = payments
            .iter_mut()
            .find(|p| p.external_id == external_id && p.status == expected)
        else {
            return Ok(None);
        };
        payment.apply(change, Utc::now());
        Ok(Some(payment.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paid() -> StatusChange {
        StatusChange {
            status: PaymentStatus::Paid,
            payment_method: Some("EWALLET".to_string()),
            payment_channel: None,
            paid_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn status_change_applies_only_from_expected_status() {
        let repo = InMemoryPaymentRepository::new().with_pending("order-1", 10);

        let stale = repo
            .apply_status_change("order-1", PaymentStatus::Paid, &paid())
            .await
            .unwrap();
        assert!(stale.is_none());
        let payment = repo.find_by_external_id("order-1").await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.payment_method.is_none());

        let applied = repo
            .apply_status_change("order-1", PaymentStatus::Pending, &paid())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(applied.status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn status_change_on_missing_payment_is_none() {
        let repo = InMemoryPaymentRepository::new();
        let result = repo
            .apply_status_change("nope", PaymentStatus::Pending, &paid())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
