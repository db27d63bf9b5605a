//! Error types for the MCP server

use thiserror::Error;

/// Errors that stop the server loop
///
/// Per-request failures never surface here; they are answered on the wire as
/// JSON-RPC errors or tool results with `isError` set.
#[derive(Error, Debug)]
pub enum MCPError {
    /// Reading stdin or writing stdout failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A response could not be serialized
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
