use crate::cli::Cli;
use crate::commands::{call_tool, connector, copy_to_clipboard, spinner, Result};
use crate::output::{format_output, OutputData};
use owo_colors::OwoColorize;
use serde_json::{Map, Value};

pub async fn run(cli: &Cli, note_id: &str, copy: bool) -> Result<()> {
    let bar = spinner(cli, "Fetching note...".to_string());

    let connector = connector()?;
    let mut arguments = Map::new();
    arguments.insert("note_id".to_string(), Value::String(note_id.to_string()));

    let payload = call_tool(&connector, "get_note", arguments).await;
    bar.finish_and_clear();
    let payload = payload?;

    format_output(&OutputData::Note(payload.clone()), cli.effective_output())?;

    if copy {
        let body = payload["note"]["body"].as_str().unwrap_or("");
        copy_to_clipboard(body)?;
        if cli.no_color {
            eprintln!("Copied body to clipboard.");
        } else {
            eprintln!("{}", "Copied body to clipboard.".dimmed());
        }
    }

    Ok(())
}
