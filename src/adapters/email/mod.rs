//! Verification email adapters.

mod log_notifier;

pub use log_notifier::LoggingVerificationNotifier;
