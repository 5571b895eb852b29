//! Payment gateway configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (invoice callback verification)
#[derive(Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Token the gateway sends in `x-callback-token`
    pub callback_token: String,
}

impl PaymentConfig {
    /// Token wrapped so it never lands in logs
    pub fn callback_token(&self) -> SecretString {
        SecretString::new(self.callback_token.clone())
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.callback_token.trim().is_empty() {
            return Err(ValidationError::MissingRequired(
                "GREEN_MARKET__PAYMENT__CALLBACK_TOKEN",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("callback_token", &"[REDACTED]")
            .finish()
    }
}
