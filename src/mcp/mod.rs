//! Model Context Protocol (MCP) server implementation
//!
//! This module provides an MCP server served over stdio. The server exposes
//! read-only tools over accounts, categories and transactions, plus `echo`.
//!
//! - **server**: `McpServer`, the `ServerHandler` that owns the combined tool router
//! - **tools**: one tool router per entity, each an `impl McpServer` block

pub mod server;
pub mod tools;


pub use server::McpServer;
