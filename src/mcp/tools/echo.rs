//! Echo tool, useful for checking that a client can reach the server.

use chrono::Utc;
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mcp::McpServer;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EchoParams {
    #[schemars(description = "Message to echo back")]
    pub message: String,
}

/// Prefix `message` with the given unix timestamp.
pub fn format_echo(unix_secs: i64, message: &str) -> String {
    format!("[{unix_secs}] {message}")
}

#[tool_router(router = echo_router, vis = "pub(crate)")]
impl McpServer {
    #[tool(description = "Echo a message back, prefixed with the server's unix timestamp")]
    pub async fn echo(&self, params: Parameters<EchoParams>) -> Result<CallToolResult, McpError> {
        debug!("echo: {} bytes", params.0.message.len());
        let text = format_echo(Utc::now().timestamp(), &params.0.message);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
