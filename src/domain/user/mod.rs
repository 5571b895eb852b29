//! User account domain module.
//!
//! # Module Structure
//!
//! - `account` - Registered user entity and the registration record
//! - `credentials` - Email and password rules shared by the HTTP and service layers
//! - `errors` - UserError returned by the user service port

mod account;
mod credentials;
mod errors;

pub use account::{NewUser, User, DEFAULT_ROLE};
pub use credentials::{normalize_email, validate_email, validate_password, MIN_PASSWORD_LENGTH};
pub use errors::UserError;
