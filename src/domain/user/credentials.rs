//! Email and password rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::ValidationError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Checks that `email` is present and shaped like an address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::invalid_format("email", "not a valid email address"));
    }
    Ok(())
}

/// Checks that `password` is present and at least six characters long.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::empty_field("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::too_short("password", MIN_PASSWORD_LENGTH));
    }
    Ok(())
}
