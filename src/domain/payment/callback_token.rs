//! Payment gateway callback token verification.
//!
//! The gateway authenticates each callback with a shared static token in the
//! `x-callback-token` header. Comparison is constant time so response timing
//! does not reveal how much of a guessed token matched.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

/// Checks callback tokens against the configured secret.
#[derive(Clone)]
pub struct CallbackTokenVerifier {
    expected: SecretString,
}

impl CallbackTokenVerifier {
    pub fn new(expected: SecretString) -> Self {
        Self { expected }
    }

    /// True only for an exact match. A missing token never matches, and
    /// neither does anything when the configured secret is empty.
    pub fn verify(&self, provided: Option<&str>) -> bool {
        let expected = self.expected.expose_secret().as_bytes();
        match provided {
            Some(token) if !expected.is_empty() => token.as_bytes().ct_eq(expected).into(),
            _ => false,
        }
    }
}

impl std::fmt::Debug for CallbackTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackTokenVerifier").finish_non_exhaustive()
    }
}
