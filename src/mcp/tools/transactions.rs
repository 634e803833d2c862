//! Transaction tool implementations
//!
//! Filtered listings carry the resolved account and category; `get_transaction`
//! and `list_transactions` return bare rows.
//! Date arguments are `YYYY-MM-DD` strings and both bounds are inclusive.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, schemars,
    schemars::JsonSchema, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::db::Id;
use crate::mcp::McpServer;
use crate::mcp::tools::{apply_limit, json_result, map_db_error, parse_date};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTransactionParams {
    #[schemars(description = "Transaction ID")]
    pub transaction_id: Id,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AccountParams {
    #[schemars(description = "Account ID")]
    pub account_id: Id,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DateRangeParams {
    #[schemars(description = "First date of the range (YYYY-MM-DD, inclusive)")]
    pub start: String,
    #[schemars(description = "Last date of the range (YYYY-MM-DD, inclusive)")]
    pub end: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AccountDateRangeParams {
    #[schemars(description = "Account ID")]
    pub account_id: Id,
    #[schemars(description = "First date of the range (YYYY-MM-DD, inclusive)")]
    pub start: String,
    #[schemars(description = "Last date of the range (YYYY-MM-DD, inclusive)")]
    pub end: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchTransactionsParams {
    #[schemars(description = "Case-insensitive substring of the description")]
    pub keyword: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LatestTransactionsParams {
    #[schemars(description = "Account ID")]
    pub account_id: Id,
    #[schemars(
        description = "Maximum number of transactions to return (default: 10, max: 20). IMPORTANT: Keep small to prevent context overflow."
    )]
    pub limit: Option<u32>,
}

#[tool_router(router = transaction_router, vis = "pub(crate)")]
impl McpServer {
    #[tool(description = "Get a transaction by ID")]
    pub async fn get_transaction(
        &self,
        params: Parameters<GetTransactionParams>,
    ) -> Result<CallToolResult, McpError> {
        let transaction = self
            .query
            .get_transaction_by_id(params.0.transaction_id)
            .await
            .map_err(map_db_error)?;

        json_result(&transaction)
    }

    #[tool(description = "List all transactions of an account")]
    pub async fn list_account_transactions(
        &self,
        params: Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let transactions = self
            .query
            .get_transactions_by_account_id(params.0.account_id)
            .await
            .map_err(map_db_error)?;

        json_result(&transactions)
    }

    #[tool(description = "List transactions dated within a range (YYYY-MM-DD, inclusive)")]
    pub async fn list_transactions_by_date_range(
        &self,
        params: Parameters<DateRangeParams>,
    ) -> Result<CallToolResult, McpError> {
        let start = parse_date("start", &params.0.start)?;
        let end = parse_date("end", &params.0.end)?;

        let transactions = self
            .query
            .get_transactions_by_date_range(start, end)
            .await
            .map_err(map_db_error)?;

        json_result(&transactions)
    }

    #[tool(
        description = "List transactions of an account dated within a range (YYYY-MM-DD, inclusive)"
    )]
    pub async fn list_account_transactions_by_date_range(
        &self,
        params: Parameters<AccountDateRangeParams>,
    ) -> Result<CallToolResult, McpError> {
        let start = parse_date("start", &params.0.start)?;
        let end = parse_date("end", &params.0.end)?;

        let transactions = self
            .query
            .get_transactions_by_account_and_date_range(params.0.account_id, start, end)
            .await
            .map_err(map_db_error)?;

        json_result(&transactions)
    }

    #[tool(description = "Search transactions whose description contains a keyword (case-insensitive)")]
    pub async fn search_transactions(
        &self,
        params: Parameters<SearchTransactionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let transactions = self
            .query
            .search_transactions_by_description(&params.0.keyword)
            .await
            .map_err(map_db_error)?;

        json_result(&transactions)
    }

    #[tool(description = "Get the balance of an account (sum of its transaction amounts)")]
    pub async fn get_account_balance(
        &self,
        params: Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let account_id = params.0.account_id;
        let balance = self
            .query
            .get_account_balance(account_id)
            .await
            .map_err(map_db_error)?;

        json_result(&json!({
            "account_id": account_id,
            "balance": balance,
        }))
    }

    #[tool(description = "Count the transactions of an account")]
    pub async fn get_transaction_count(
        &self,
        params: Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let account_id = params.0.account_id;
        let count = self
            .query
            .get_transaction_count(account_id)
            .await
            .map_err(map_db_error)?;

        json_result(&json!({
            "account_id": account_id,
            "count": count,
        }))
    }

    /// Latest transactions of an account (default: 10, max: 20)
    #[tool(
        description = "Get the latest transactions of an account, newest first. Default limit: 10, max: 20 to prevent context overflow."
    )]
    pub async fn get_latest_transactions(
        &self,
        params: Parameters<LatestTransactionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = apply_limit(params.0.limit);
        debug!(
            "get_latest_transactions: account {} limit {}",
            params.0.account_id, limit
        );

        let transactions = self
            .query
            .get_latest_transactions(params.0.account_id, limit)
            .await
            .map_err(map_db_error)?;

        json_result(&transactions)
    }

    #[tool(description = "Summarize an account's transactions per category (total and count)")]
    pub async fn get_transaction_summary(
        &self,
        params: Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let summary = self
            .query
            .get_transaction_summary_by_category(params.0.account_id)
            .await
            .map_err(map_db_error)?;

        json_result(&summary)
    }

    #[tool(description = "List all transactions")]
    pub async fn list_transactions(&self) -> Result<CallToolResult, McpError> {
        let transactions = self
            .query
            .get_all_transactions()
            .await
            .map_err(map_db_error)?;

        json_result(&transactions)
    }
}
