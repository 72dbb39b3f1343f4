use crate::cli::Cli;
use crate::commands::{call_tool, connector, spinner, Result};
use crate::output::{format_output, OutputData};
use serde_json::{Map, Value};

pub async fn run(cli: &Cli, note_id: &str, text: &str) -> Result<()> {
    let bar = spinner(cli, "Appending to note...".to_string());

    let connector = connector()?;
    let mut arguments = Map::new();
    arguments.insert("note_id".to_string(), Value::String(note_id.to_string()));
    arguments.insert("text".to_string(), Value::String(text.to_string()));

    let payload = call_tool(&connector, "append_to_note", arguments).await;
    bar.finish_and_clear();

    format_output(&OutputData::Note(payload?), cli.effective_output())
}
