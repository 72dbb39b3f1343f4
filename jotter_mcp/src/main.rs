use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use jotter_core::{
    mcp_server::{JsonRpcHandler, McpServer},
    transport::StdioTransport,
    AppleNotesConnector, Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging must go to stderr; stdout is reserved for JSON-RPC frames.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("Starting Jotter MCP server");

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            error!("Config load failed, continuing with defaults: {}", err);
            Config::default()
        }
    };

    let connector = AppleNotesConnector::new(config);
    let server = McpServer::new(Arc::new(connector));
    let handler = JsonRpcHandler::new(server);
    let transport = StdioTransport::new(handler);

    info!("MCP server ready, listening on stdio");

    if let Err(e) = transport.run().await {
        error!("Transport error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
