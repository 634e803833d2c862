//! Shared helper functions for SQLite repositories.

use sqlx::error::ErrorKind;

use crate::db::DbError;

/// Largest number of bound ids in one `IN (...)` list, below SQLite's
/// 32766 host parameter limit.
pub const MAX_IN_IDS: usize = 10_000;

/// Classify an SQLx error into the storage-agnostic taxonomy.
pub fn map_sqlx_error(err: sqlx::Error) -> DbError {
    match err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => DbError::Constraint {
                message: db_err.message().to_string(),
            },
            _ => DbError::Database {
                message: db_err.message().to_string(),
            },
        },
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => DbError::Connection {
            message: err.to_string(),
        },
        other => DbError::Database {
            message: other.to_string(),
        },
    }
}

/// Whether `text` contains `keyword`, ignoring case across all of Unicode.
///
/// SQLite `LIKE` only folds ASCII, so name and description searches filter
/// in Rust instead. Wildcard characters in `keyword` have no special meaning.
pub fn contains_ignore_case(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(&keyword.to_lowercase())
}

/// Comma-separated `?` placeholders for an `IN (...)` list.
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
