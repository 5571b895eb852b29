//! Concrete implementations of the service ports.

mod payment_processor;
mod product_catalog;
mod user_accounts;

pub use payment_processor::PaymentProcessor;
pub use product_catalog::ProductCatalog;
pub use user_accounts::UserAccounts;
