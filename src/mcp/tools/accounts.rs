//! Account tool implementations

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, schemars,
    schemars::JsonSchema, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::Id;
use crate::mcp::McpServer;
use crate::mcp::tools::{json_result, map_db_error};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetAccountParams {
    #[schemars(description = "Account ID")]
    pub account_id: Id,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetAccountByNameParams {
    #[schemars(description = "Exact account name")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchAccountsParams {
    #[schemars(description = "Case-insensitive substring of the account name")]
    pub keyword: String,
}

#[tool_router(router = account_router, vis = "pub(crate)")]
impl McpServer {
    #[tool(description = "Get an account by ID")]
    pub async fn get_account(
        &self,
        params: Parameters<GetAccountParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("get_account: {}", params.0.account_id);
        let account = self
            .query
            .get_account_by_id(params.0.account_id)
            .await
            .map_err(map_db_error)?;

        json_result(&account)
    }

    #[tool(description = "Get an account by its exact name")]
    pub async fn get_account_by_name(
        &self,
        params: Parameters<GetAccountByNameParams>,
    ) -> Result<CallToolResult, McpError> {
        let account = self
            .query
            .get_account_by_name(&params.0.name)
            .await
            .map_err(map_db_error)?;

        json_result(&account)
    }

    #[tool(description = "Search accounts whose name contains a keyword (case-insensitive)")]
    pub async fn search_accounts(
        &self,
        params: Parameters<SearchAccountsParams>,
    ) -> Result<CallToolResult, McpError> {
        let accounts = self
            .query
            .search_accounts(&params.0.keyword)
            .await
            .map_err(map_db_error)?;

        json_result(&accounts)
    }

    #[tool(description = "List all accounts")]
    pub async fn list_accounts(&self) -> Result<CallToolResult, McpError> {
        let accounts = self
            .query
            .get_all_accounts()
            .await
            .map_err(map_db_error)?;

        json_result(&accounts)
    }
}
