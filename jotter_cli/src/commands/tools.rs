use crate::cli::Cli;
use crate::commands::{connector, Result};
use crate::output::{format_output, OutputData};
use jotter_core::ToolProvider;

/// Dump the tool catalog the MCP server exposes. Useful for wiring up
/// clients without starting a server.
pub async fn run(cli: &Cli) -> Result<()> {
    let connector = connector()?;
    let catalog = connector.list_tools(None).await?;

    let payload = serde_json::to_value(&catalog)?;
    format_output(&OutputData::Tools(payload), cli.effective_output())
}
