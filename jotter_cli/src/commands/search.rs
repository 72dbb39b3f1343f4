use crate::cli::Cli;
use crate::commands::{call_tool, connector, spinner, Result};
use crate::output::{format_output, OutputData};
use serde_json::{Map, Value};

pub async fn run(cli: &Cli, query: &str, folder: Option<&str>, limit: Option<u64>) -> Result<()> {
    let bar = spinner(cli, format!("Searching for '{}'...", query));

    let connector = connector()?;
    let mut arguments = Map::new();
    arguments.insert("query".to_string(), Value::String(query.to_string()));
    if let Some(folder) = folder {
        arguments.insert("folder".to_string(), Value::String(folder.to_string()));
    }
    if let Some(limit) = limit {
        arguments.insert("limit".to_string(), Value::from(limit));
    }

    let payload = call_tool(&connector, "search_notes", arguments).await;
    bar.finish_and_clear();

    let data = OutputData::SearchResults {
        query: query.to_string(),
        results: payload?,
    };
    format_output(&data, cli.effective_output())
}
