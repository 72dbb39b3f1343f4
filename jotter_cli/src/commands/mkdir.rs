use crate::cli::Cli;
use crate::commands::{call_tool, connector, spinner, Result};
use crate::output::{format_output, OutputData};
use serde_json::{Map, Value};

pub async fn run(cli: &Cli, name: &str) -> Result<()> {
    let bar = spinner(cli, format!("Creating folder '{}'...", name));

    let connector = connector()?;
    let mut arguments = Map::new();
    arguments.insert("name".to_string(), Value::String(name.to_string()));

    let payload = call_tool(&connector, "create_folder", arguments).await;
    bar.finish_and_clear();

    format_output(&OutputData::Folder(payload?), cli.effective_output())
}
