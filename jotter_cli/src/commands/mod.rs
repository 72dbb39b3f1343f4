pub mod append;
pub mod edit;
pub mod folders;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod new;
pub mod rm;
pub mod search;
pub mod show;
pub mod tools;

use crate::cli::Cli;
use indicatif::{ProgressBar, ProgressStyle};
use jotter_core::{AppleNotesConnector, CallToolRequestParam, Config, JotterError, ToolProvider};
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("{0}")]
    Core(#[from] JotterError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CommandError>;

/// Build the connector the way the MCP server does: from the user config.
pub fn connector() -> Result<AppleNotesConnector> {
    let config = Config::load()?;
    Ok(AppleNotesConnector::new(config))
}

/// Invoke one tool and return its structured payload.
pub async fn call_tool(
    connector: &AppleNotesConnector,
    tool: &'static str,
    arguments: Map<String, Value>,
) -> Result<Value> {
    tracing::debug!(tool, "invoking connector");
    let response = connector
        .call_tool(CallToolRequestParam {
            name: tool.into(),
            arguments: Some(arguments),
        })
        .await?;
    Ok(response.structured_content.unwrap_or_else(|| json!({})))
}

/// Spinner for the osascript round trip. Hidden under `--no-color` so plain
/// output stays plain.
pub fn spinner(cli: &Cli, message: String) -> ProgressBar {
    let bar = if cli.no_color {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress template"),
    );
    bar.set_message(message);
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    bar
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| CommandError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| CommandError::Clipboard(e.to_string()))?;
    Ok(())
}

/// Body text from the flag, or from stdin when the flag is absent.
pub fn read_body(body: Option<&str>) -> Result<String> {
    use std::io::{IsTerminal, Read};

    match body {
        Some(text) => Ok(text.to_string()),
        None => {
            if std::io::stdin().is_terminal() {
                eprintln!("Reading body from stdin; finish with Ctrl-D.");
            }
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
