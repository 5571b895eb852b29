//! Verification notifier that writes the link to the structured log.
//!
//! Stands in for an SMTP sender in development and in deployments where a
//! log shipper forwards `verification_link` events to a mailer.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::user::User;
use crate::ports::VerificationNotifier;

pub struct LoggingVerificationNotifier {
    base_url: String,
}

impl LoggingVerificationNotifier {
    /// `base_url` is the verification endpoint; the code is appended as the
    /// last path segment.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn link_for(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

#[async_trait]
impl VerificationNotifier for LoggingVerificationNotifier {
    async fn send_verification(&self, user: &User, code: &str) -> Result<(), DomainError> {
        tracing::info!(
            user_id = %user.id,
            email = %user.email,
            verification_link = %self.link_for(code),
            "Verification email queued"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_appends_code_once() {
        let notifier =
            LoggingVerificationNotifier::new("http://localhost:8080/api/users/email-verification/");
        assert_eq!(
            notifier.link_for("abc"),
            "http://localhost:8080/api/users/email-verification/abc"
        );
    }
}
