//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - Accounts and verification codes
//! - `PostgresProductRepository` / `PostgresCategoryRepository` - Catalog
//! - `PostgresPaymentRepository` - Payment records

mod payment_repository;
mod product_repository;
mod user_repository;

pub use payment_repository::PostgresPaymentRepository;
pub use product_repository::{PostgresCategoryRepository, PostgresProductRepository};
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Builds the connection pool from configuration.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database("Failed to connect to database", e))
}

/// Applies the embedded `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Migration failed: {}", e)))
}
