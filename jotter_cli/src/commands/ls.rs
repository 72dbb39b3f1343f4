use crate::cli::Cli;
use crate::commands::{call_tool, connector, spinner, Result};
use crate::output::{format_output, OutputData};
use serde_json::{Map, Value};

pub async fn run(cli: &Cli, folder: Option<&str>, limit: Option<u64>) -> Result<()> {
    let message = match folder {
        Some(folder) => format!("Reading notes in '{}'...", folder),
        None => "Reading notes...".to_string(),
    };
    let bar = spinner(cli, message);

    let connector = connector()?;
    let mut arguments = Map::new();
    if let Some(folder) = folder {
        arguments.insert("folder".to_string(), Value::String(folder.to_string()));
    }
    if let Some(limit) = limit {
        arguments.insert("limit".to_string(), Value::from(limit));
    }

    let payload = call_tool(&connector, "list_notes", arguments).await;
    bar.finish_and_clear();

    format_output(&OutputData::Notes(payload?), cli.effective_output())
}
