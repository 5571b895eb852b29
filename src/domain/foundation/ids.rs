//! Strongly-typed identifier value objects.
//!
//! Every persisted entity uses a database-generated `BIGINT` key. Identifiers
//! arrive from path segments and token subjects as decimal strings, so each
//! type parses from an unsigned decimal and rejects anything else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database key.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database key.
            pub fn value(&self) -> i64 {
                self.0
            }

            /// Zero is never assigned by the database.
            pub fn is_assigned(&self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: u64 = s.trim().parse().map_err(|_| {
                    ValidationError::invalid_format($field, "must be an unsigned integer")
                })?;
                let value = i64::try_from(raw).map_err(|_| {
                    ValidationError::invalid_format($field, "value is too large")
                })?;
                Ok(Self(value))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a registered user.
    UserId,
    "user_id"
);

numeric_id!(
    /// Identifier of a catalog product.
    ProductId,
    "product_id"
);

numeric_id!(
    /// Identifier of a product category.
    CategoryId,
    "category_id"
);
