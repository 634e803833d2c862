//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module. `SqliteRepository<T>` carries the
//! CRUD logic once; the entity repositories wrap it and add their queries.

mod account;
mod base;
mod category;
mod connection;
mod helpers;
mod transaction;

#[cfg(test)]
mod category_test;

pub use account::SqliteAccountRepository;
pub use base::{SqliteEntity, SqliteQuery, SqliteRepository};
pub use category::SqliteCategoryRepository;
pub use connection::{IN_MEMORY_PATH, SqliteDatabase};
pub use transaction::SqliteTransactionRepository;
