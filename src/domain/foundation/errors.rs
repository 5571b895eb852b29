//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and input validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    EmptyField { field: String },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    #[error("{field} {constraint}")]
    OutOfRange { field: String, constraint: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a minimum length validation error.
    pub fn too_short(field: impl Into<String>, min: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
        }
    }

    /// Creates an out of range validation error. `constraint` reads as the
    /// tail of a sentence, e.g. "must be greater than 0".
    pub fn out_of_range(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Lookup errors
    NotFound,
    Conflict,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // Infrastructure errors
    Timeout,
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error, keeping the driver message.
    pub fn database(context: &str, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns true when the error reports a uniqueness violation.
    pub fn is_conflict(&self) -> bool {
        self.code == ErrorCode::Conflict
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::new(ErrorCode::ValidationFailed, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("full_name");
        assert_eq!(format!("{}", err), "full_name is required");
    }

    #[test]
    fn validation_error_too_short_displays_correctly() {
        let err = ValidationError::too_short("password", 6);
        assert_eq!(format!("{}", err), "password must be at least 6 characters");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("discount", "must be between 0 and 100");
        assert_eq!(format!("{}", err), "discount must be between 0 and 100");
    }

    #[test]
    fn validation_error_reports_field() {
        let err = ValidationError::invalid_format("email", "not an email address");
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::NotFound, "Product not found");
        assert_eq!(format!("{}", err), "[NOT_FOUND] Product not found");
    }

    #[test]
    fn domain_error_from_validation_keeps_field_detail() {
        let err: DomainError = ValidationError::empty_field("unit").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"unit".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::Timeout), "TIMEOUT");
        assert_eq!(format!("{}", ErrorCode::DatabaseError), "DATABASE_ERROR");
    }
}
