// src/lib.rs
pub mod config;
pub mod error;
pub mod mcp_server;
pub mod notes;
pub mod transport;
pub mod utils;

// Re-export types from rmcp that users of this library might need
pub use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, InitializeRequestParam,
    InitializeResult, ListPromptsResult, ListResourcesResult, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, Tool, ToolsCapability,
};

pub use crate::config::Config;
pub use crate::error::JotterError;
pub use crate::notes::AppleNotesConnector;

use async_trait::async_trait;

/// The seam between the protocol plumbing and whatever answers tool calls.
///
/// `McpServer` talks to exactly one provider; in production that is
/// [`AppleNotesConnector`], in tests it can be anything.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Short machine-friendly name, used as the MCP server name.
    fn name(&self) -> &'static str;

    /// One-line description shown by clients and the CLI.
    fn description(&self) -> &'static str;

    /// Returns the MCP capabilities of this provider.
    async fn capabilities(&self) -> ServerCapabilities;

    async fn initialize(
        &self,
        request: InitializeRequestParam,
    ) -> Result<InitializeResult, JotterError>;

    async fn list_tools(
        &self,
        request: Option<PaginatedRequestParam>,
    ) -> Result<ListToolsResult, JotterError>;

    async fn call_tool(&self, request: CallToolRequestParam)
        -> Result<CallToolResult, JotterError>;
}
