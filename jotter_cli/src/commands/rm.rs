use crate::cli::Cli;
use crate::commands::{call_tool, connector, spinner, Result};
use crate::output::{format_output, OutputData};
use serde_json::{Map, Value};
use std::io::Write;

pub async fn run(cli: &Cli, note_id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(note_id)? {
        println!("Aborted.");
        return Ok(());
    }

    let bar = spinner(cli, "Deleting note...".to_string());

    let connector = connector()?;
    let mut arguments = Map::new();
    arguments.insert("note_id".to_string(), Value::String(note_id.to_string()));

    let payload = call_tool(&connector, "delete_note", arguments).await;
    bar.finish_and_clear();
    payload?;

    let data = OutputData::Deleted {
        note_id: note_id.to_string(),
    };
    format_output(&data, cli.effective_output())
}

/// Deletion is not undoable through the automation interface, so ask first.
fn confirm(note_id: &str) -> Result<bool> {
    print!("Delete note {}? [y/N] ", note_id);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
