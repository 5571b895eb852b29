//! In-memory repository adapters.
//!
//! Used by tests and by local runs without a database. Each repository keeps
//! its rows behind a `RwLock` and assigns ids from a counter, mimicking
//! `BIGINT IDENTITY` columns.

mod catalog;
mod payments;
mod users;

pub use catalog::{InMemoryCategoryRepository, InMemoryProductRepository};
pub use payments::InMemoryPaymentRepository;
pub use users::InMemoryUserRepository;

use std::sync::PoisonError;

use crate::domain::foundation::{DomainError, ErrorCode};

fn lock_poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::new(ErrorCode::InternalError, "in-memory store lock poisoned")
}
