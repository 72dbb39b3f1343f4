use crate::cli::OutputFormat;
use crate::commands::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod pretty;

/// One payload per command, tagged so `--output json`/`--output yaml` stay
/// self-describing. The `Value` members are the connector's structured
/// results, passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OutputData {
    Notes(Value),
    SearchResults { query: String, results: Value },
    Note(Value),
    Folders(Value),
    Folder(Value),
    Deleted { note_id: String },
    Tools(Value),
}

pub fn format_output(data: &OutputData, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(data)?);
        }
        OutputFormat::Text => {
            format_text_output(data);
        }
        OutputFormat::Pretty => {
            format_pretty_output(data);
        }
    }
    Ok(())
}

/// Tab-separated lines for lists, raw bodies for single notes. Meant for
/// pipes: `jotter ls --output text | cut -f1`.
fn format_text_output(data: &OutputData) {
    match data {
        OutputData::Notes(payload) => {
            for note in list_items(payload, "notes") {
                println!(
                    "{}\t{}\t{}\t{}",
                    field(note, "id"),
                    pretty::short_date(field(note, "modified")),
                    field(note, "folder"),
                    field(note, "title"),
                );
            }
        }
        OutputData::SearchResults { results, .. } => {
            for hit in list_items(results, "results") {
                println!(
                    "{}\t{}\t{}",
                    field(hit, "id"),
                    field(hit, "title"),
                    field(hit, "snippet"),
                );
            }
        }
        OutputData::Note(payload) => {
            println!("{}", field(&payload["note"], "body"));
        }
        OutputData::Folders(payload) => {
            for folder in list_items(payload, "folders") {
                println!(
                    "{}\t{}\t{}",
                    field(folder, "name"),
                    folder["note_count"].as_i64().unwrap_or(0),
                    field(folder, "account"),
                );
            }
        }
        OutputData::Folder(payload) => {
            println!("{}", field(&payload["folder"], "name"));
        }
        OutputData::Deleted { note_id } => {
            println!("deleted\t{}", note_id);
        }
        OutputData::Tools(payload) => {
            for tool in list_items(payload, "tools") {
                println!("{}\t{}", field(tool, "name"), field(tool, "description"));
            }
        }
    }
}

fn format_pretty_output(data: &OutputData) {
    use owo_colors::OwoColorize;

    match data {
        OutputData::Notes(payload) => {
            let notes = list_items(payload, "notes");
            if notes.is_empty() {
                println!("{}", no_results_line(payload, "No notes found."));
                return;
            }
            println!("{}", pretty::section_header("notes", notes.len()));
            println!();
            println!("{}", pretty::note_cards(notes));
            println!(
                "{} Use {} to read a note",
                "Tip:".green().bold(),
                "jotter show <note-id>".cyan()
            );
        }
        OutputData::SearchResults { query, results } => {
            println!("{} {}", "Search:".bold().cyan(), query.yellow());
            println!();
            let hits = list_items(results, "results");
            if hits.is_empty() {
                println!("{}", no_results_line(results, "No matching notes."));
                return;
            }
            println!("{}", pretty::section_header("matches", hits.len()));
            println!();
            println!("{}", pretty::note_cards(hits));
        }
        OutputData::Note(payload) => {
            println!("{}", pretty::render_note(&payload["note"]));
        }
        OutputData::Folders(payload) => {
            let folders = list_items(payload, "folders");
            if folders.is_empty() {
                println!("{}", no_results_line(payload, "No folders found."));
                return;
            }
            println!("{}", "Folders".bold().cyan());
            println!();
            println!("{}", pretty::folder_table(folders));
        }
        OutputData::Folder(payload) => {
            println!(
                "{} {}",
                "Created folder".green(),
                field(&payload["folder"], "name").bold()
            );
        }
        OutputData::Deleted { note_id } => {
            println!("{} {}", "Deleted".green(), note_id.dimmed());
        }
        OutputData::Tools(payload) => {
            let tools = list_items(payload, "tools");
            println!("{}", "Tools".bold().cyan());
            println!();
            println!("{}", pretty::tool_table(tools));
        }
    }
}

/// The connector attaches `message` to empty list payloads; prefer it over a
/// generic fallback.
fn no_results_line<'a>(payload: &'a Value, fallback: &'a str) -> &'a str {
    payload
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or(fallback)
}

fn list_items<'a>(payload: &'a Value, key: &str) -> &'a [Value] {
    payload
        .get(key)
        .and_then(|v| v.as_array())
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(|v| v.as_str()).unwrap_or("")
}
