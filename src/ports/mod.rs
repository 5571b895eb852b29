//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - Accounts and verification codes
//! - `ProductRepository` / `CategoryRepository` - Catalog
//! - `PaymentRepository` - Payment records
//!
//! ## Infrastructure Ports
//!
//! - `SessionValidator` / `TokenIssuer` - Bearer tokens
//! - `PasswordHasher` - One-way password hashing
//! - `VerificationNotifier` - Verification code delivery
//!
//! ## Service Ports
//!
//! Consumed by the HTTP handlers: `UserService`, `ProductService`,
//! `PaymentsService`.

mod password_hasher;
mod payment_repository;
mod payments_service;
mod product_repository;
mod product_service;
mod session_validator;
mod token_issuer;
mod user_repository;
mod user_service;
mod verification_notifier;

pub use password_hasher::PasswordHasher;
pub use payment_repository::PaymentRepository;
pub use payments_service::PaymentsService;
pub use product_repository::{CategoryRepository, ProductRepository};
pub use product_service::ProductService;
pub use session_validator::SessionValidator;
pub use token_issuer::{IssuedToken, TokenIssuer};
pub use user_repository::UserRepository;
pub use user_service::{LoginUser, RegisterUser, UserService};
pub use verification_notifier::VerificationNotifier;
