//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT tokens and Argon2 password hashing
//! - `email` - Verification code delivery
//! - `http` - Axum REST API
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - PostgreSQL repositories

pub mod auth;
pub mod email;
pub mod http;
pub mod memory;
pub mod postgres;
