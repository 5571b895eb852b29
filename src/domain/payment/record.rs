//! Persisted payment record.

use chrono::{DateTime, Utc};

use super::PaymentStatus;

/// A payment created at checkout and updated by gateway callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    pub external_id: String,
    pub user_id: Option<i64>,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: Option<String>,
    pub payment_channel: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written when a callback moves a payment to a new status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub status: PaymentStatus,
    pub payment_method: Option<String>,
    pub payment_channel: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Applies a status change in place.
    pub fn apply(&mut self, change: &StatusChange, now: DateTime<Utc>) {
        self.status = change.status;
        if change.payment_method.is_some() {
            self.payment_method = change.payment_method.clone();
        }
        if change.payment_channel.is_some() {
            self.payment_channel = change.payment_channel.clone();
        }
        if change.paid_at.is_some() {
            self.paid_at = change.paid_at;
        }
        self.updated_at = now;
    }
}
