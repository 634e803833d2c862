//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access over
//! accounts, categories and transactions, with a SQLite implementation.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Account, Category, Transaction)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed implementation of the traits

mod error;
mod models;
mod repository;
pub mod sqlite;
mod utils;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::{
    SqliteAccountRepository, SqliteCategoryRepository, SqliteDatabase, SqliteRepository,
    SqliteTransactionRepository,
};
