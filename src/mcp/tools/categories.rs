//! Category tool implementations

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, schemars,
    schemars::JsonSchema, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::db::Id;
use crate::mcp::McpServer;
use crate::mcp::tools::{json_result, map_db_error};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetCategoryParams {
    #[schemars(description = "Category ID")]
    pub category_id: Id,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListCategoriesByTypeParams {
    #[schemars(description = "Category type, e.g. EXPENSE or INCOME (exact match)")]
    pub category_type: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchCategoriesParams {
    #[schemars(description = "Case-insensitive substring of the category name")]
    pub keyword: String,
}

#[tool_router(router = category_router, vis = "pub(crate)")]
impl McpServer {
    #[tool(description = "Get a category by ID")]
    pub async fn get_category(
        &self,
        params: Parameters<GetCategoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let category = self
            .query
            .get_category_by_id(params.0.category_id)
            .await
            .map_err(map_db_error)?;

        json_result(&category)
    }

    #[tool(description = "List categories of the given type")]
    pub async fn list_categories_by_type(
        &self,
        params: Parameters<ListCategoriesByTypeParams>,
    ) -> Result<CallToolResult, McpError> {
        let categories = self
            .query
            .get_categories_by_type(&params.0.category_type)
            .await
            .map_err(map_db_error)?;

        json_result(&categories)
    }

    #[tool(description = "Search categories whose name contains a keyword (case-insensitive)")]
    pub async fn search_categories(
        &self,
        params: Parameters<SearchCategoriesParams>,
    ) -> Result<CallToolResult, McpError> {
        let categories = self
            .query
            .search_categories(&params.0.keyword)
            .await
            .map_err(map_db_error)?;

        json_result(&categories)
    }

    #[tool(description = "List all categories")]
    pub async fn list_categories(&self) -> Result<CallToolResult, McpError> {
        let categories = self
            .query
            .get_all_categories()
            .await
            .map_err(map_db_error)?;

        json_result(&categories)
    }
}
