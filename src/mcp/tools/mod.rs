//! MCP tool implementations
//!
//! Each submodule adds one `#[tool_router]` block to [`McpServer`](crate::mcp::McpServer).
//! The helpers here are the only place database errors become protocol errors.

pub mod accounts;
pub mod categories;
pub mod echo;
pub mod transactions;

#[cfg(test)]
mod echo_test;
#[cfg(test)]
mod transactions_test;

use chrono::NaiveDate;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use serde_json::json;

use crate::db::DbError;

/// Default number of rows returned by limited tools.
pub const DEFAULT_LIMIT: u32 = 10;
/// Upper bound on rows returned by limited tools.
pub const MAX_LIMIT: u32 = 20;

/// Date format accepted by date arguments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Clamp an optional caller limit to `MAX_LIMIT`, defaulting to `DEFAULT_LIMIT`.
pub fn apply_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
}

/// Map DbError to McpError.
pub fn map_db_error(err: DbError) -> McpError {
    match err {
        DbError::NotFound { .. } => McpError::resource_not_found(
            "not_found",
            Some(json!({"error": err.to_string()})),
        ),
        DbError::Constraint { .. } => McpError::invalid_params(
            "constraint_violation",
            Some(json!({"error": err.to_string()})),
        ),
        _ => McpError::internal_error("database_error", Some(json!({"error": err.to_string()}))),
    }
}

/// Parse a `YYYY-MM-DD` argument named `field`.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, McpError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        McpError::invalid_params(
            "invalid_date",
            Some(json!({
                "field": field,
                "value": value,
                "error": format!("expected YYYY-MM-DD: {e}"),
            })),
        )
    })
}

/// Render `value` as pretty JSON in a single text content item.
pub fn json_result<T: Serialize + ?Sized>(value: &T) -> Result<CallToolResult, McpError> {
    let content = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error("serialization_error", Some(json!({"error": e.to_string()})))
    })?;

    Ok(CallToolResult::success(vec![Content::text(content)]))
}
