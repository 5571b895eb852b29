//! Authentication adapters.
//!
//! - `jwt` - HS256 access tokens (`TokenIssuer` + `SessionValidator`)
//! - `password` - Argon2id `PasswordHasher`

mod jwt;
mod password;

pub use jwt::{AccessClaims, JwtTokenService};
pub use password::Argon2PasswordHasher;
