//! Application layer - Service implementations.
//!
//! This layer orchestrates domain rules and coordinates between ports. Each
//! service implements one of the service ports the HTTP handlers consume.

pub mod services;

pub use services::{PaymentProcessor, ProductCatalog, UserAccounts};
