//! Pretty formatter for terminal output.
//!
//! Lists render as numbered cards (title, id, metadata) so the long Core Data
//! note ids stay selectable; folders and tools fit in tables.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde_json::Value;

/// Terminal width fallback when detection fails
const DEFAULT_WIDTH: usize = 80;

/// Format a list of note summaries or search hits as numbered cards.
pub fn note_cards(items: &[Value]) -> String {
    let mut output = String::new();
    for (i, item) in items.iter().enumerate() {
        output.push_str(&note_card(item, i + 1));
        if i < items.len() - 1 {
            output.push('\n');
        }
    }
    output
}

fn note_card(item: &Value, index: usize) -> String {
    let mut output = String::new();

    let title = item
        .get("title")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("(untitled)");
    // Pad the number before coloring so the escape codes don't skew alignment
    let number = format!("{:>4}.", index);
    output.push_str(&format!(
        "{} {}\n",
        number.cyan().bold(),
        truncate(title, 70).bold()
    ));

    if let Some(id) = item.get("id").and_then(|v| v.as_str()) {
        output.push_str(&format!("      {}\n", id.dimmed()));
    }

    // Search hits carry a snippet; plain summaries don't
    if let Some(snippet) = item.get("snippet").and_then(|v| v.as_str()) {
        if !snippet.is_empty() {
            output.push_str(&format!("      {}\n", truncate(snippet, 100).dimmed()));
        }
    }

    let mut meta = Vec::new();
    if let Some(modified) = item.get("modified").and_then(|v| v.as_str()) {
        meta.push(format!("modified: {}", short_date(modified)));
    }
    for key in ["folder", "account"] {
        if let Some(value) = item.get(key).and_then(|v| v.as_str()) {
            if !value.is_empty() {
                meta.push(format!("{}: {}", key, value));
            }
        }
    }
    if !meta.is_empty() {
        output.push_str(&format!("      {}\n", meta.join("  ").dimmed()));
    }

    output
}

/// Render one full note: title, id, metadata, then the body wrapped to the
/// terminal width.
pub fn render_note(note: &Value) -> String {
    let width = terminal_width().min(100);
    let mut output = String::new();

    let title = note
        .get("title")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("(untitled)");
    output.push_str(&format!("{}\n", title.bold()));

    if let Some(id) = note.get("id").and_then(|v| v.as_str()) {
        output.push_str(&format!("{}\n", id.dimmed()));
    }

    let mut meta = Vec::new();
    for key in ["folder", "account"] {
        if let Some(value) = note.get(key).and_then(|v| v.as_str()) {
            if !value.is_empty() {
                meta.push(format!("{}: {}", key, value));
            }
        }
    }
    if let Some(modified) = note.get("modified").and_then(|v| v.as_str()) {
        meta.push(format!("modified: {}", short_date(modified)));
    }
    if !meta.is_empty() {
        output.push_str(&format!("{}\n", meta.join("  ").dimmed()));
    }
    output.push('\n');

    let body = note.get("body").and_then(|v| v.as_str()).unwrap_or("");
    if body.is_empty() {
        output.push_str(&format!("{}\n", "(empty note)".dimmed()));
    } else {
        output.push_str(&textwrap::fill(body, width));
        output.push('\n');
    }

    if note
        .get("truncated")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
    {
        output.push('\n');
        output.push_str(&format!(
            "{}\n",
            "Body truncated; pass a larger max body length to see the rest.".yellow()
        ));
    }

    output.trim_end_matches('\n').to_string()
}

pub fn folder_table(folders: &[Value]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(terminal_width() as u16)
        .set_header(vec!["Folder", "Notes", "Account"]);

    for folder in folders {
        table.add_row(vec![
            text_field(folder, "name"),
            folder
                .get("note_count")
                .and_then(|v| v.as_i64())
                .unwrap_or(0)
                .to_string(),
            text_field(folder, "account"),
        ]);
    }

    table.to_string()
}

pub fn tool_table(tools: &[Value]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(terminal_width() as u16)
        .set_header(vec!["Tool", "Description"]);

    for tool in tools {
        table.add_row(vec![
            text_field(tool, "name"),
            text_field(tool, "description"),
        ]);
    }

    table.to_string()
}

/// Section header with a horizontal rule filling the line.
pub fn section_header(label: &str, count: usize) -> String {
    let width = terminal_width();
    let header_text = format!("{} ({})", label, count);
    let line_len = width.saturating_sub(header_text.len() + 4).min(60);
    let line = "─".repeat(line_len);

    format!("{} {} {}", "──".cyan(), header_text.green().bold(), line.cyan())
}

/// Date portion of an ISO-8601 timestamp.
pub fn short_date(iso: &str) -> &str {
    iso.split('T').next().unwrap_or(iso)
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

fn truncate(s: &str, max_len: usize) -> String {
    // First line only; note bodies routinely hold newlines
    let first_line = s.lines().next().unwrap_or(s);

    if first_line.chars().count() <= max_len {
        first_line.to_string()
    } else {
        let truncated: String = first_line.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_card_shows_title_and_id() {
        let note = json!({
            "id": "x-coredata://ABC/ICNote/p42",
            "title": "Groceries",
            "modified": "2024-03-05T08:00:00.000Z",
            "folder": "Personal",
            "account": "iCloud"
        });
        let output = note_card(&note, 1);
        assert!(output.contains("Groceries"));
        assert!(output.contains("x-coredata://ABC/ICNote/p42"));
        assert!(output.contains("modified: 2024-03-05"));
    }

    #[test]
    fn test_render_note_flags_truncation() {
        let note = json!({
            "id": "x-coredata://ABC/ICNote/p42",
            "title": "Long",
            "body": "cut off",
            "truncated": true
        });
        let output = render_note(&note);
        assert!(output.contains("cut off"));
        assert!(output.contains("truncated"));
    }

    #[test]
    fn test_truncate_keeps_first_line() {
        let truncated = truncate("first line\nsecond line", 50);
        assert_eq!(truncated, "first line");

        let long = "This is a very long string that should be truncated";
        let truncated = truncate(long, 20);
        assert!(truncated.ends_with("..."));
        assert!(truncated.chars().count() <= 20);
    }

    #[test]
    fn test_section_header_carries_count() {
        let header = section_header("notes", 12);
        assert!(header.contains("notes"));
        assert!(header.contains("12"));
    }
}
