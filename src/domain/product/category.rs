use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::foundation::CategoryId;

/// A product category. Products reference it by id and also keep a copy of
/// the label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    #[serde(rename = "category_id")]
    pub id: CategoryId,
    #[serde(rename = "product_category")]
    pub label: String,
    pub created_at: DateTime<Utc>,
}
