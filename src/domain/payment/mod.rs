//! Payment domain module.
//!
//! Payment records are created by checkout; this module covers the status
//! updates delivered by the payment gateway's invoice callback.
//!
//! # Module Structure
//!
//! - `callback_token` - Shared-secret check for gateway callbacks
//! - `notification` - Decoded gateway callback
//! - `record` - Persisted payment record
//! - `status` - PaymentStatus state machine
//! - `errors` - PaymentError returned by the payments service port

mod callback_token;
mod errors;
mod notification;
mod record;
mod status;

pub use callback_token::CallbackTokenVerifier;
pub use errors::PaymentError;
pub use notification::{NotificationItem, PaymentNotification};
pub use record::{Payment, StatusChange};
pub use status::PaymentStatus;
