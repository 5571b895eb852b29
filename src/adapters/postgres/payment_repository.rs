//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::{Payment, PaymentStatus, StatusChange};
use crate::ports::PaymentRepository;

/// PostgreSQL implementation of the PaymentRepository port.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    external_id: String,
    user_id: Option<i64>,
    amount: i64,
    currency: String,
    status: String,
    payment_method: Option<String>,
    payment_channel: Option<String>,
    paid_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status: PaymentStatus = row.status.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid payment status value: {}", row.status),
            )
        })?;

        Ok(Payment {
            id: row.id,
            external_id: row.external_id,
            user_id: row.user_id,
            amount: row.amount,
            currency: row.currency,
            status,
            payment_method: row.payment_method,
            payment_channel: row.payment_channel,
            paid_at: row.paid_at,
            updated_at: row.updated_at,
        })
    }
}

const PAYMENT_COLUMNS: &str = "id, external_id, user_id, amount, currency, status, \
     payment_method, payment_channel, paid_at, updated_at";

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE external_id = $1"
        ))
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find payment", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn apply_status_change(
        &self,
        external_id: &str,
        expected: PaymentStatus,
        change: &StatusChange,
    ) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            r#"
            UPDATE payments SET
                status = $2,
                payment_method = COALESCE($3, payment_method),
                payment_channel = COALESCE($4, payment_channel),
                paid_at = COALESCE($5, paid_at),
                updated_at = NOW()
            WHERE external_id = $1
              AND status = $6
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(external_id)
        .bind(change.status.as_str())
        .bind(&change.payment_method)
        .bind(&change.payment_channel)
        .bind(change.paid_at)
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update payment", e))?;

        row.map(Payment::try_from).transpose()
    }
}
