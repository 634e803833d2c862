//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! Store-specific errors are classified into these kinds once, at the
//! storage boundary, and then propagated unchanged.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(finance::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(code(finance::db::constraint))]
    Constraint { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(finance::db::connection_error))]
    Connection { message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(finance::db::configuration),
        help("Build the query facade with repositories, a pool, or a connection config")
    )]
    Configuration { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(finance::db::migration_error))]
    Migration { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(finance::db::database_error))]
    Database { message: String },
}

impl DbError {
    /// Shorthand for a point lookup that matched no rows.
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        DbError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Whether this error means a single-row lookup found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
