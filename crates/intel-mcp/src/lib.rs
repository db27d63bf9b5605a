//! Model Context Protocol (MCP) server for client-intel
//!
//! Serves any [`ToolCatalog`](intel_core::ToolCatalog) over newline-delimited
//! JSON-RPC 2.0 on stdin/stdout. Supported methods:
//! - `initialize` and `notifications/initialized`
//! - `ping`
//! - `tools/list` and `tools/call`
//!
//! # Example
//!
//! ```no_run
//! use intel_core::ToolCatalog;
//! use intel_mcp::{McpServer, ServerInfo};
//! use std::sync::Arc;
//!
//! # async fn example<C: ToolCatalog + 'static>(catalog: C) -> intel_mcp::Result<()> {
//! let server = McpServer::new(Arc::new(catalog), ServerInfo::new("client-intel", "0.1.0"));
//! server.serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod protocol;
pub mod server;

pub use error::MCPError;
pub use protocol::{CallToolResult, Content, JsonRpcRequest, JsonRpcResponse, RpcError, ToolDefinition};
pub use server::{McpServer, ServerInfo};

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, MCPError>;
