//! MCP server implementation
//!
//! `McpServer` wraps the query facade and routes tool calls to the per-entity
//! tool routers defined under [`crate::mcp::tools`].

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::ops::QueryOps;

/// MCP server over the finance query facade.
#[derive(Clone)]
pub struct McpServer {
    pub(crate) query: Arc<QueryOps>,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server answering tool calls from `query`.
    pub fn new(query: impl Into<Arc<QueryOps>>) -> Self {
        Self {
            query: query.into(),
            tool_router: Self::echo_router()
                + Self::account_router()
                + Self::category_router()
                + Self::transaction_router(),
        }
    }

    /// Get the combined tool router
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(
            "Finance MCP Server - Query accounts, categories and transactions. \
             Dates use YYYY-MM-DD; amounts are decimal strings."
                .to_string(),
        );
        info
    }
}
