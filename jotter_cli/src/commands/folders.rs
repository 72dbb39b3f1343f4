use crate::cli::Cli;
use crate::commands::{call_tool, connector, spinner, Result};
use crate::output::{format_output, OutputData};
use serde_json::Map;

pub async fn run(cli: &Cli) -> Result<()> {
    let bar = spinner(cli, "Reading folders...".to_string());

    let connector = connector()?;
    let payload = call_tool(&connector, "list_folders", Map::new()).await;
    bar.finish_and_clear();

    format_output(&OutputData::Folders(payload?), cli.effective_output())
}
