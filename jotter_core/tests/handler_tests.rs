// JSON-RPC dispatch tests backed by a canned ToolProvider.

use async_trait::async_trait;
use jotter_core::mcp_server::{JsonRpcHandler, McpServer};
use jotter_core::{
    CallToolRequestParam, CallToolResult, Implementation, InitializeRequestParam, InitializeResult,
    JotterError, ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, Tool,
    ToolProvider, ToolsCapability,
};
use serde_json::json;
use std::sync::Arc;

struct FakeProvider;

#[async_trait]
impl ToolProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake-notes"
    }

    fn description(&self) -> &'static str {
        "Canned provider for dispatch tests"
    }

    async fn capabilities(&self) -> ServerCapabilities {
        ServerCapabilities {
            tools: Some(ToolsCapability { list_changed: None }),
            ..Default::default()
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
    ) -> Result<InitializeResult, JotterError> {
        Ok(InitializeResult {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: self.capabilities().await,
            server_info: Implementation {
                name: self.name().to_string(),
                title: None,
                version: "0.0.0".to_string(),
                icons: None,
                website_url: None,
            },
            instructions: None,
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
    ) -> Result<ListToolsResult, JotterError> {
        Ok(ListToolsResult {
            tools: vec![Tool {
                name: "echo".into(),
                title: None,
                description: Some("Echo the arguments back".into()),
                input_schema: Arc::new(
                    json!({"type": "object", "properties": {}})
                        .as_object()
                        .unwrap()
                        .clone(),
                ),
                output_schema: None,
                annotations: None,
                icons: None,
            }],
            next_cursor: None,
        })
    }

    async fn call_tool(&self, request: CallToolRequestParam) -> Result<CallToolResult, JotterError> {
        match request.name.as_ref() {
            "echo" => Ok(CallToolResult {
                content: Vec::new(),
                structured_content: Some(json!({ "echo": request.arguments })),
                is_error: Some(false),
                meta: None,
            }),
            "explode" => Err(JotterError::Script("boom".to_string())),
            "missing" => Err(JotterError::NoteNotFound("x-coredata://0".to_string())),
            _ => Err(JotterError::ToolNotFound),
        }
    }
}

fn handler() -> JsonRpcHandler {
    JsonRpcHandler::new(McpServer::new(Arc::new(FakeProvider)))
}

#[tokio::test]
async fn test_initialize_roundtrip() {
    let response = handler()
        .handle_request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "0.0.0"}
            }
        }))
        .await
        .unwrap();

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["serverInfo"]["name"], "fake-notes");
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_ping_returns_empty_result() {
    let response = handler()
        .handle_request(json!({"jsonrpc": "2.0", "id": 7, "method": "ping"}))
        .await
        .unwrap();

    assert_eq!(response["result"], json!({}));
    assert_eq!(response["id"], 7);
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let h = handler();

    let silent = h
        .handle_request(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
        .await;
    assert!(silent.is_none());

    // A frame without an id is a notification even for request methods
    let silent = h
        .handle_request(json!({"jsonrpc": "2.0", "method": "tools/list"}))
        .await;
    assert!(silent.is_none());

    // An explicit null id counts as absent
    let silent = h
        .handle_request(json!({"jsonrpc": "2.0", "id": null, "method": "ping"}))
        .await;
    assert!(silent.is_none());
}

#[tokio::test]
async fn test_tools_list() {
    let response = handler()
        .handle_request(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .await
        .unwrap();

    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "echo");
    assert_eq!(tools[0]["inputSchema"]["type"], "object");
}

#[tokio::test]
async fn test_tools_call_success() {
    let response = handler()
        .handle_request(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "echo", "arguments": {"x": 1}}
        }))
        .await
        .unwrap();

    assert_eq!(response["result"]["structuredContent"]["echo"]["x"], 1);
    assert_eq!(response["result"]["isError"], false);
}

#[tokio::test]
async fn test_tool_failure_maps_to_internal_error() {
    let response = handler()
        .handle_request(json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "explode"}
        }))
        .await
        .unwrap();

    assert_eq!(response["error"]["code"], -32603);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("boom"));
    assert!(response.get("result").is_none());
}

#[tokio::test]
async fn test_not_found_and_unknown_tool_are_invalid_params() {
    let h = handler();

    let response = h
        .handle_request(json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "tools/call",
            "params": {"name": "missing"}
        }))
        .await
        .unwrap();
    assert_eq!(response["error"]["code"], -32602);

    let response = h
        .handle_request(json!({
            "jsonrpc": "2.0",
            "id": 6,
            "method": "tools/call",
            "params": {"name": "no-such-tool"}
        }))
        .await
        .unwrap();
    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn test_unknown_method_is_rejected() {
    let response = handler()
        .handle_request(json!({"jsonrpc": "2.0", "id": 8, "method": "frobnicate"}))
        .await
        .unwrap();

    assert_eq!(response["error"]["code"], -32601);
}

#[tokio::test]
async fn test_resources_and_prompts_are_empty_sets() {
    let h = handler();

    let response = h
        .handle_request(json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"}))
        .await
        .unwrap();
    assert!(response["result"]["resources"].as_array().unwrap().is_empty());

    let response = h
        .handle_request(json!({"jsonrpc": "2.0", "id": 10, "method": "prompts/list"}))
        .await
        .unwrap();
    assert!(response["result"]["prompts"].as_array().unwrap().is_empty());

    let response = h
        .handle_request(json!({
            "jsonrpc": "2.0",
            "id": 11,
            "method": "resources/read",
            "params": {"uri": "notes://nope"}
        }))
        .await
        .unwrap();
    assert_eq!(response["error"]["code"], -32602);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("notes://nope"));
}
