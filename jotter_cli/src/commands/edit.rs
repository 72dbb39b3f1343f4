use crate::cli::Cli;
use crate::commands::{call_tool, connector, read_body, spinner, Result};
use crate::output::{format_output, OutputData};
use serde_json::{Map, Value};

pub async fn run(cli: &Cli, note_id: &str, body: Option<&str>, title: Option<&str>) -> Result<()> {
    let body = read_body(body)?;

    let bar = spinner(cli, "Updating note...".to_string());

    let connector = connector()?;
    let mut arguments = Map::new();
    arguments.insert("note_id".to_string(), Value::String(note_id.to_string()));
    arguments.insert("body".to_string(), Value::String(body));
    if let Some(title) = title {
        arguments.insert("title".to_string(), Value::String(title.to_string()));
    }

    let payload = call_tool(&connector, "update_note", arguments).await;
    bar.finish_and_clear();

    format_output(&OutputData::Note(payload?), cli.effective_output())
}
