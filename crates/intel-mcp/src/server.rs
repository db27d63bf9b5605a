//! Stdio MCP server
//!
//! Reads one JSON-RPC message per line, handles it to completion, and writes
//! the response (if any) as one line. Notifications get no response.

use intel_core::ToolCatalog;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::Result;
use crate::protocol::{
    CallToolParams, CallToolResult, JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse,
    LATEST_PROTOCOL_VERSION, RpcError, SUPPORTED_PROTOCOL_VERSIONS, ToolDefinition,
};

/// Identity reported in the `initialize` result
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub instructions: Option<String>,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            instructions: None,
        }
    }

    /// Usage hint the host may show to its model
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

/// MCP server over a tool catalog
pub struct McpServer<C> {
    catalog: Arc<C>,
    info: ServerInfo,
}

impl<C: ToolCatalog> McpServer<C> {
    pub fn new(catalog: Arc<C>, info: ServerInfo) -> Self {
        Self { catalog, info }
    }

    /// Serve on the process's stdin/stdout until stdin closes
    pub async fn serve_stdio(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve newline-delimited JSON-RPC until the reader is exhausted
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = %self.info.name, version = %self.info.version, "MCP server listening on stdio");

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            let mut payload = serde_json::to_string(&response)?;
            payload.push('\n');
            writer.write_all(payload.as_bytes()).await?;
            writer.flush().await?;
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw line; `None` when nothing should be written back
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(message) => self.handle_message(message).await,
            Err(err) => {
                warn!(error = %err, "Unparseable message");
                Some(JsonRpcResponse::failure(Value::Null, RpcError::parse_error(err)))
            }
        }
    }

    /// Handle one decoded message
    pub async fn handle_message(&self, message: Value) -> Option<JsonRpcResponse> {
        let Value::Object(object) = &message else {
            return Some(JsonRpcResponse::failure(
                Value::Null,
                RpcError::invalid_request("expected a JSON object"),
            ));
        };

        // Responses to requests we never send
        if !object.contains_key("method")
            && (object.contains_key("result") || object.contains_key("error"))
        {
            debug!("Ignoring JSON-RPC response from client");
            return None;
        }

        let id = object.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(err) => {
                return Some(JsonRpcResponse::failure(
                    id.unwrap_or(Value::Null),
                    RpcError::invalid_request(err),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                request.id.unwrap_or(Value::Null),
                RpcError::invalid_request(format!("unsupported jsonrpc '{}'", request.jsonrpc)),
            ));
        }

        let Some(id) = request.id.clone() else {
            self.handle_notification(&request);
            return None;
        };

        Some(match self.dispatch(request).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => info!("Client initialized"),
            "notifications/cancelled" => debug!("Client cancelled a request"),
            other => debug!(method = other, "Ignoring notification"),
        }
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> std::result::Result<Value, RpcError> {
        debug!(method = %request.method, "Handling request");

        match request.method.as_str() {
            "initialize" => Ok(self.initialize(request.params.as_ref())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(RpcError::method_not_found(other)),
        }
    }

    fn initialize(&self, params: Option<&Value>) -> Value {
        let requested = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str);
        let version = requested
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
            .unwrap_or(LATEST_PROTOCOL_VERSION);

        if let Some(client) = params.and_then(|p| p.get("clientInfo")) {
            info!(client = %client, protocol = version, "Initialize");
        }

        let mut result = json!({
            "protocolVersion": version,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.info.name,
                "version": self.info.version
            }
        });
        if let Some(instructions) = &self.info.instructions {
            result["instructions"] = json!(instructions);
        }
        result
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<ToolDefinition> = self
            .catalog
            .tools()
            .iter()
            .map(|tool| ToolDefinition::from_tool(tool.as_ref()))
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: Option<Value>) -> std::result::Result<Value, RpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| RpcError::invalid_params("missing params"))
            .and_then(|p| serde_json::from_value(p).map_err(RpcError::invalid_params))?;

        let tool = self
            .catalog
            .resolve(&params.name)
            .ok_or_else(|| RpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        let arguments = params
            .arguments
            .unwrap_or_else(|| Value::Object(Map::new()));

        let started = Instant::now();
        let result = match tool.execute(arguments).await {
            Ok(payload) => {
                info!(tool = %params.name, elapsed_ms = started.elapsed().as_millis() as u64, "Tool call succeeded");
                CallToolResult::success(payload)
            }
            Err(err) => {
                warn!(tool = %params.name, kind = %err.kind(), error = %err.message(), "Tool call failed");
                CallToolResult::error(&err)
            }
        };

        serde_json::to_value(result).map_err(RpcError::internal)
    }
}
