use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{JotterError, ToolProvider};
use rmcp::model::*;

/// MCP server over a single tool provider.
pub struct McpServer {
    provider: Arc<dyn ToolProvider>,
}

impl McpServer {
    pub fn new(provider: Arc<dyn ToolProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle_initialize(
        &self,
        request: InitializeRequestParam,
    ) -> Result<InitializeResult, JotterError> {
        info!(client = %request.client_info.name, "MCP server initializing");
        self.provider.initialize(request).await
    }

    pub async fn handle_list_tools(
        &self,
        request: Option<PaginatedRequestParam>,
    ) -> Result<ListToolsResult, JotterError> {
        self.provider.list_tools(request).await
    }

    pub async fn handle_call_tool(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, JotterError> {
        self.provider.call_tool(request).await
    }

    /// The Notes surface is tools only; resources and prompts are served as
    /// empty sets so standard clients can probe them without tripping errors.
    pub fn handle_list_resources(&self) -> ListResourcesResult {
        ListResourcesResult {
            resources: vec![],
            next_cursor: None,
        }
    }

    pub fn handle_list_prompts(&self) -> ListPromptsResult {
        ListPromptsResult {
            prompts: vec![],
            next_cursor: None,
        }
    }
}

/// JSON-RPC message handler for the MCP server
pub struct JsonRpcHandler {
    server: McpServer,
}

impl JsonRpcHandler {
    pub fn new(server: McpServer) -> Self {
        Self { server }
    }

    /// Process one JSON-RPC message. Notifications (frames without an `id`,
    /// and anything under `notifications/`) are consumed without a response.
    pub async fn handle_request(&self, request: Value) -> Option<Value> {
        debug!("Handling JSON-RPC request: {:?}", request);

        let method = request.get("method").and_then(|m| m.as_str()).unwrap_or("");
        let params = request.get("params").cloned().unwrap_or(json!({}));

        if method.starts_with("notifications/") {
            debug!(method, "notification consumed");
            return None;
        }
        let id = match request.get("id") {
            Some(id) if !id.is_null() => id.clone(),
            _ => {
                debug!(method, "frame without id consumed");
                return None;
            }
        };

        let result = match method {
            "initialize" => match serde_json::from_value::<InitializeRequestParam>(params) {
                Ok(req) => self
                    .server
                    .handle_initialize(req)
                    .await
                    .and_then(|r| serde_json::to_value(r).map_err(JotterError::Json))
                    .map_err(|e| e.to_jsonrpc_error()),
                Err(e) => Err(JotterError::Json(e).to_jsonrpc_error()),
            },
            "ping" => Ok(json!({})),
            "tools/list" => match serde_json::from_value::<Option<PaginatedRequestParam>>(params) {
                Ok(req) => self
                    .server
                    .handle_list_tools(req)
                    .await
                    .and_then(|r| serde_json::to_value(r).map_err(JotterError::Json))
                    .map_err(|e| e.to_jsonrpc_error()),
                Err(e) => Err(JotterError::Json(e).to_jsonrpc_error()),
            },
            "tools/call" => match serde_json::from_value::<CallToolRequestParam>(params) {
                Ok(req) => self
                    .server
                    .handle_call_tool(req)
                    .await
                    .and_then(|r| serde_json::to_value(r).map_err(JotterError::Json))
                    .map_err(|e| e.to_jsonrpc_error()),
                Err(e) => Err(JotterError::Json(e).to_jsonrpc_error()),
            },
            "resources/list" => serde_json::to_value(self.server.handle_list_resources())
                .map_err(|e| JotterError::Json(e).to_jsonrpc_error()),
            "resources/read" => {
                let uri = params.get("uri").and_then(|v| v.as_str()).unwrap_or("");
                Err(JotterError::InvalidParams(format!("Unknown resource: {}", uri))
                    .to_jsonrpc_error())
            }
            "prompts/list" => serde_json::to_value(self.server.handle_list_prompts())
                .map_err(|e| JotterError::Json(e).to_jsonrpc_error()),
            "prompts/get" => {
                let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
                Err(JotterError::InvalidParams(format!("Unknown prompt: {}", name))
                    .to_jsonrpc_error())
            }
            _ => Err(JotterError::MethodNotFound.to_jsonrpc_error()),
        };

        Some(match result {
            Ok(result) => json!({
                "jsonrpc": "2.0",
                "result": result,
                "id": id,
            }),
            Err(error) => json!({
                "jsonrpc": "2.0",
                "error": error,
                "id": id,
            }),
        })
    }
}
