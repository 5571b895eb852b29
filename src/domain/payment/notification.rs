//! Decoded invoice callback from the payment gateway.

use chrono::{DateTime, Utc};

/// A line item echoed back by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationItem {
    pub purpose: String,
    pub name: String,
    pub price: i64,
    pub category: String,
    pub quantity: i64,
}

/// Invoice status update as delivered to the webhook.
///
/// Amounts are integral minor units, as sent by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentNotification {
    /// Gateway-side invoice id.
    pub transaction_id: String,
    pub items: Vec<NotificationItem>,
    pub amount: i64,
    /// Raw status string; parsed by the payments service.
    pub status: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub is_high: bool,
    pub user_id: String,
    pub currency: String,
    pub description: String,
    /// Merchant-side reference the payment record is keyed by.
    pub external_id: String,
    pub merchant_name: String,
    pub payment_method: String,
    pub payment_channel: String,
    pub payment_destination: String,
    pub failure_redirect_url: String,
    pub success_redirect_url: String,
    pub purpose: String,
}
