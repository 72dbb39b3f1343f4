use crate::cli::Cli;
use crate::commands::{call_tool, connector, read_body, spinner, Result};
use crate::output::{format_output, OutputData};
use serde_json::{Map, Value};

pub async fn run(cli: &Cli, title: &str, body: Option<&str>, folder: Option<&str>) -> Result<()> {
    // Read stdin before the spinner starts drawing over the prompt
    let body = read_body(body)?;

    let bar = spinner(cli, format!("Creating '{}'...", title));

    let connector = connector()?;
    let mut arguments = Map::new();
    arguments.insert("title".to_string(), Value::String(title.to_string()));
    arguments.insert("body".to_string(), Value::String(body));
    if let Some(folder) = folder {
        arguments.insert("folder".to_string(), Value::String(folder.to_string()));
    }

    let payload = call_tool(&connector, "create_note", arguments).await;
    bar.finish_and_clear();

    format_output(&OutputData::Note(payload?), cli.effective_output())
}
