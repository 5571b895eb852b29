//! Invoice callback payload as sent by the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::payment::{NotificationItem, PaymentNotification};

/// Header carrying the shared callback token.
pub const CALLBACK_TOKEN_HEADER: &str = "x-callback-token";

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookItem {
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookMetadata {
    #[serde(default)]
    pub purpose: String,
}

/// Body of `POST /xendit`. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub items: Vec<WebhookItem>,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_high: bool,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub merchant_name: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_channel: String,
    #[serde(default)]
    pub payment_destination: String,
    #[serde(default)]
    pub failure_redirect_url: String,
    #[serde(default)]
    pub success_redirect_url: String,
    #[serde(default)]
    pub metadata: Option<WebhookMetadata>,
}

impl From<WebhookRequest> for PaymentNotification {
    fn from(req: WebhookRequest) -> Self {
        PaymentNotification {
            transaction_id: req.id,
            items: req
                .items
                .into_iter()
                .map(|item| NotificationItem {
                    purpose: item.purpose,
                    name: item.name,
                    price: item.price,
                    category: item.category,
                    quantity: item.quantity,
                })
                .collect(),
            amount: req.amount,
            status: req.status,
            created: req.created,
            updated: req.updated,
            is_high: req.is_high,
            user_id: req.user_id,
            currency: req.currency,
            description: req.description,
            external_id: req.external_id,
            merchant_name: req.merchant_name,
            payment_method: req.payment_method,
            payment_channel: req.payment_channel,
            payment_destination: req.payment_destination,
            failure_redirect_url: req.failure_redirect_url,
            success_redirect_url: req.success_redirect_url,
            purpose: req.metadata.unwrap_or_default().purpose,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookAck {
    pub success: bool,
    pub message: String,
}
