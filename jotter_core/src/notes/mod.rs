// Apple Notes connector - Notes.app automation behind the MCP tool surface
// macOS only - notes stored in iCloud, On My Mac, or other accounts
//
// Scripts are generated per call, run through the osascript adapter, and
// post-processed here: filtering, sorting and limits all happen host-side.

pub mod model;
pub mod osa;
pub mod scripts;

use crate::config::Config;
use crate::error::JotterError;
use crate::utils::structured_result;
use crate::ToolProvider;
use async_trait::async_trait;
use rmcp::model::*;
use serde_json::{json, Map, Value};
use std::borrow::Cow;
use std::sync::Arc;

use model::{Folder, Note, NoteSummary, SearchHit};
use osa::OsaRunner;

/// Bytes of body context kept on either side of a search match.
const SNIPPET_RADIUS: usize = 80;

/// Apple Notes connector - the one `ToolProvider` this workspace serves.
pub struct AppleNotesConnector {
    config: Config,
    runner: OsaRunner,
}

impl AppleNotesConnector {
    pub fn new(config: Config) -> Self {
        let runner = OsaRunner::new(&config);
        Self { config, runner }
    }

    /// Swap the interpreter, for tests and debugging shims.
    pub fn with_runner(config: Config, runner: OsaRunner) -> Self {
        Self { config, runner }
    }

    async fn list_notes(&self, args: &Map<String, Value>) -> Result<CallToolResult, JotterError> {
        let folder = args.get("folder").and_then(|v| v.as_str());
        let limit = model::clamp_limit(
            args.get("limit").and_then(|v| v.as_u64()),
            self.config.default_limit,
            self.config.max_limit,
        );

        let value = self.runner.run(&scripts::list_notes(folder)).await?;
        let mut notes: Vec<NoteSummary> = take_list(value, "notes")?;
        model::sort_newest_first(&mut notes);
        notes.truncate(limit);
        structured_result(&json!({ "notes": notes, "count": notes.len() }))
    }

    async fn search_notes(&self, args: &Map<String, Value>) -> Result<CallToolResult, JotterError> {
        let query = required_str(args, "query")?;
        let folder = args.get("folder").and_then(|v| v.as_str());
        let limit = model::clamp_limit(
            args.get("limit").and_then(|v| v.as_u64()),
            self.config.default_limit,
            self.config.max_limit,
        );

        let value = self.runner.run(&scripts::search_notes(folder)).await?;
        let notes: Vec<Note> = take_list(value, "notes")?;
        let mut hits: Vec<SearchHit> = notes
            .into_iter()
            .filter(|n| model::matches_query(&n.title, &n.body, query))
            .map(|n| SearchHit {
                snippet: model::snippet_around(&n.body, query, SNIPPET_RADIUS),
                id: n.id,
                title: n.title,
                created: n.created,
                modified: n.modified,
                folder: n.folder,
                account: n.account,
            })
            .collect();
        model::sort_hits_newest_first(&mut hits);
        hits.truncate(limit);
        structured_result(&json!({ "results": hits, "count": hits.len(), "query": query }))
    }

    async fn get_note(&self, args: &Map<String, Value>) -> Result<CallToolResult, JotterError> {
        let note_id = required_str(args, "note_id")?;
        let max_len = args
            .get("max_body_length")
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
            .unwrap_or(self.config.max_body_length);

        let value = self.runner.run(&scripts::get_note(note_id)).await?;
        let mut note: Note = take_record(value, "note")?;
        let (body, truncated) = model::truncate_body(&note.body, max_len);
        note.body = body;
        note.truncated = truncated;
        structured_result(&json!({ "note": note }))
    }

    async fn create_note(&self, args: &Map<String, Value>) -> Result<CallToolResult, JotterError> {
        let title = required_str(args, "title")?;
        // Present but possibly empty: a title-only note is legitimate.
        let body = args
            .get("body")
            .and_then(|v| v.as_str())
            .ok_or_else(|| JotterError::InvalidParams("Missing 'body'".to_string()))?;
        let folder = args
            .get("folder")
            .and_then(|v| v.as_str())
            .or(self.config.default_folder.as_deref());

        let value = self
            .runner
            .run(&scripts::create_note(title, body, folder))
            .await?;
        let note: Note = take_record(value, "note")?;
        structured_result(&json!({ "note": note }))
    }

    async fn update_note(&self, args: &Map<String, Value>) -> Result<CallToolResult, JotterError> {
        let note_id = required_str(args, "note_id")?;
        let body = args
            .get("body")
            .and_then(|v| v.as_str())
            .ok_or_else(|| JotterError::InvalidParams("Missing 'body'".to_string()))?;
        let title = args.get("title").and_then(|v| v.as_str());

        let value = self
            .runner
            .run(&scripts::update_note(note_id, body, title))
            .await?;
        let note: Note = take_record(value, "note")?;
        structured_result(&json!({ "note": note }))
    }

    async fn append_to_note(&self, args: &Map<String, Value>) -> Result<CallToolResult, JotterError> {
        let note_id = required_str(args, "note_id")?;
        let text = required_str(args, "text")?;

        let value = self
            .runner
            .run(&scripts::append_note(note_id, text))
            .await?;
        let note: Note = take_record(value, "note")?;
        structured_result(&json!({ "note": note }))
    }

    async fn delete_note(&self, args: &Map<String, Value>) -> Result<CallToolResult, JotterError> {
        let note_id = required_str(args, "note_id")?;
        self.runner.run(&scripts::delete_note(note_id)).await?;
        structured_result(&json!({ "deleted": true, "note_id": note_id }))
    }

    async fn move_note(&self, args: &Map<String, Value>) -> Result<CallToolResult, JotterError> {
        let note_id = required_str(args, "note_id")?;
        let folder = required_str(args, "folder")?;

        let value = self
            .runner
            .run(&scripts::move_note(note_id, folder))
            .await?;
        let note: Note = take_record(value, "note")?;
        structured_result(&json!({ "note": note }))
    }

    async fn list_folders(&self) -> Result<CallToolResult, JotterError> {
        let value = self.runner.run(&scripts::list_folders()).await?;
        let folders: Vec<Folder> = take_list(value, "folders")?;
        structured_result(&json!({ "folders": folders, "count": folders.len() }))
    }

    async fn create_folder(&self, args: &Map<String, Value>) -> Result<CallToolResult, JotterError> {
        let name = required_str(args, "name")?;
        let value = self.runner.run(&scripts::create_folder(name)).await?;
        let folder: Folder = take_record(value, "folder")?;
        structured_result(&json!({ "folder": folder }))
    }
}

fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str, JotterError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| JotterError::InvalidParams(format!("Missing '{}'", key)))
}

fn take_list<T: serde::de::DeserializeOwned>(
    mut value: Value,
    key: &str,
) -> Result<Vec<T>, JotterError> {
    match value.get_mut(key).map(Value::take) {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(list) => serde_json::from_value(list)
            .map_err(|e| JotterError::ScriptOutput(format!("unexpected '{}' payload: {}", key, e))),
    }
}

fn take_record<T: serde::de::DeserializeOwned>(
    mut value: Value,
    key: &str,
) -> Result<T, JotterError> {
    match value.get_mut(key).map(Value::take) {
        Some(record) if !record.is_null() => serde_json::from_value(record)
            .map_err(|e| JotterError::ScriptOutput(format!("unexpected '{}' record: {}", key, e))),
        _ => Err(JotterError::ScriptOutput(format!(
            "missing '{}' record",
            key
        ))),
    }
}

#[async_trait]
impl ToolProvider for AppleNotesConnector {
    fn name(&self) -> &'static str {
        "jotter"
    }

    fn description(&self) -> &'static str {
        "Apple Notes.app access for macOS. List, search, read, create, update, move and delete notes, and manage folders. First use may trigger an automation permission prompt."
    }

    async fn capabilities(&self) -> ServerCapabilities {
        ServerCapabilities {
            tools: Some(ToolsCapability { list_changed: None }),
            ..Default::default()
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
    ) -> Result<InitializeResult, JotterError> {
        Ok(InitializeResult {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: self.capabilities().await,
            server_info: Implementation {
                name: self.name().to_string(),
                title: Some("Apple Notes".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Native Notes.app integration. Note IDs come from list_notes or search_notes; folders are addressed by name."
                    .to_string(),
            ),
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
    ) -> Result<ListToolsResult, JotterError> {
        Ok(ListToolsResult {
            tools: tool_catalog(),
            next_cursor: None,
        })
    }

    async fn call_tool(&self, request: CallToolRequestParam) -> Result<CallToolResult, JotterError> {
        let name = request.name.as_ref();
        let args = request.arguments.unwrap_or_default();
        tracing::debug!(tool = name, "tool call");

        match name {
            "list_notes" => self.list_notes(&args).await,
            "search_notes" => self.search_notes(&args).await,
            "get_note" => self.get_note(&args).await,
            "create_note" => self.create_note(&args).await,
            "update_note" => self.update_note(&args).await,
            "append_to_note" => self.append_to_note(&args).await,
            "delete_note" => self.delete_note(&args).await,
            "move_note" => self.move_note(&args).await,
            "list_folders" => self.list_folders().await,
            "create_folder" => self.create_folder(&args).await,
            _ => Err(JotterError::ToolNotFound),
        }
    }
}

fn tool_catalog() -> Vec<Tool> {
    vec![
        // Listing & Reading
        Tool {
            name: Cow::Borrowed("list_notes"),
            title: Some("List Notes".to_string()),
            description: Some(Cow::Borrowed(
                "List notes with title, dates, and location, newest first. Optionally filter by folder. Returns summaries - use 'get_note' for full content.",
            )),
            input_schema: Arc::new(
                json!({
                    "type": "object",
                    "properties": {
                        "folder": {
                            "type": "string",
                            "description": "Filter to a specific folder name."
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Maximum notes to return. Default: 50, Max: 200.",
                            "default": 50
                        }
                    }
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            output_schema: None,
            annotations: None,
            icons: None,
        },
        Tool {
            name: Cow::Borrowed("search_notes"),
            title: Some("Search Notes".to_string()),
            description: Some(Cow::Borrowed(
                "Search notes by keyword in title or body (case-insensitive). Returns matches newest first with a snippet of context.",
            )),
            input_schema: Arc::new(
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search term to find in note title or body. Required."
                        },
                        "folder": {
                            "type": "string",
                            "description": "Limit the search to a specific folder."
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Maximum results. Default: 50, Max: 200.",
                            "default": 50
                        }
                    },
                    "required": ["query"]
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            output_schema: None,
            annotations: None,
            icons: None,
        },
        Tool {
            name: Cow::Borrowed("get_note"),
            title: Some("Get Note Content".to_string()),
            description: Some(Cow::Borrowed(
                "Retrieve the full content of a note by its ID. Returns title, body text, dates, and location. Use note IDs from list_notes or search_notes.",
            )),
            input_schema: Arc::new(
                json!({
                    "type": "object",
                    "properties": {
                        "note_id": {
                            "type": "string",
                            "description": "Note ID obtained from list_notes or search_notes. Required."
                        },
                        "max_body_length": {
                            "type": "integer",
                            "description": "Maximum characters of note body to return. Default: 50000.",
                            "default": 50000
                        }
                    },
                    "required": ["note_id"]
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            output_schema: None,
            annotations: None,
            icons: None,
        },
        // Creation & Editing
        Tool {
            name: Cow::Borrowed("create_note"),
            title: Some("Create Note".to_string()),
            description: Some(Cow::Borrowed(
                "Create a new note with title and body. Optionally specify a folder. Returns the new note.",
            )),
            input_schema: Arc::new(
                json!({
                    "type": "object",
                    "properties": {
                        "title": {
                            "type": "string",
                            "description": "Note title (becomes the first line/heading). Required."
                        },
                        "body": {
                            "type": "string",
                            "description": "Note body text. Use \\n for line breaks. Required, may be empty."
                        },
                        "folder": {
                            "type": "string",
                            "description": "Folder to create the note in. Uses the default folder if omitted."
                        }
                    },
                    "required": ["title", "body"]
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            output_schema: None,
            annotations: None,
            icons: None,
        },
        Tool {
            name: Cow::Borrowed("update_note"),
            title: Some("Update Note".to_string()),
            description: Some(Cow::Borrowed(
                "Replace the entire body of an existing note. Use get_note first to preserve content you want to keep.",
            )),
            input_schema: Arc::new(
                json!({
                    "type": "object",
                    "properties": {
                        "note_id": {
                            "type": "string",
                            "description": "Note ID to update. Required."
                        },
                        "body": {
                            "type": "string",
                            "description": "New body content (replaces the entire note body). Required."
                        },
                        "title": {
                            "type": "string",
                            "description": "Replacement title. When omitted the first line of the new body becomes the title."
                        }
                    },
                    "required": ["note_id", "body"]
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            output_schema: None,
            annotations: None,
            icons: None,
        },
        Tool {
            name: Cow::Borrowed("append_to_note"),
            title: Some("Append to Note".to_string()),
            description: Some(Cow::Borrowed(
                "Add text to the end of an existing note. Useful for incremental updates or logging.",
            )),
            input_schema: Arc::new(
                json!({
                    "type": "object",
                    "properties": {
                        "note_id": {
                            "type": "string",
                            "description": "Note ID to append to. Required."
                        },
                        "text": {
                            "type": "string",
                            "description": "Text to append. Use \\n for line breaks. Required."
                        }
                    },
                    "required": ["note_id", "text"]
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            output_schema: None,
            annotations: None,
            icons: None,
        },
        Tool {
            name: Cow::Borrowed("delete_note"),
            title: Some("Delete Note".to_string()),
            description: Some(Cow::Borrowed(
                "Delete a note (moves it to Recently Deleted). Use with caution.",
            )),
            input_schema: Arc::new(
                json!({
                    "type": "object",
                    "properties": {
                        "note_id": {
                            "type": "string",
                            "description": "Note ID to delete. Required."
                        }
                    },
                    "required": ["note_id"]
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            output_schema: None,
            annotations: None,
            icons: None,
        },
        Tool {
            name: Cow::Borrowed("move_note"),
            title: Some("Move Note".to_string()),
            description: Some(Cow::Borrowed(
                "Move a note into another folder. The folder is addressed by name; the first folder with that name wins.",
            )),
            input_schema: Arc::new(
                json!({
                    "type": "object",
                    "properties": {
                        "note_id": {
                            "type": "string",
                            "description": "Note ID to move. Required."
                        },
                        "folder": {
                            "type": "string",
                            "description": "Destination folder name. Required."
                        }
                    },
                    "required": ["note_id", "folder"]
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            output_schema: None,
            annotations: None,
            icons: None,
        },
        // Folders
        Tool {
            name: Cow::Borrowed("list_folders"),
            title: Some("List Folders".to_string()),
            description: Some(Cow::Borrowed(
                "List folders across all accounts. Shows folder names, IDs, owning account, and note counts.",
            )),
            input_schema: Arc::new(
                json!({"type": "object", "properties": {}})
                    .as_object()
                    .unwrap()
                    .clone(),
            ),
            output_schema: None,
            annotations: None,
            icons: None,
        },
        Tool {
            name: Cow::Borrowed("create_folder"),
            title: Some("Create Folder".to_string()),
            description: Some(Cow::Borrowed(
                "Create a new folder in the default account.",
            )),
            input_schema: Arc::new(
                json!({
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Name for the new folder. Required."
                        }
                    },
                    "required": ["name"]
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            output_schema: None,
            annotations: None,
            icons: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TOOLS: &[&str] = &[
        "list_notes",
        "search_notes",
        "get_note",
        "create_note",
        "update_note",
        "append_to_note",
        "delete_note",
        "move_note",
        "list_folders",
        "create_folder",
    ];

    #[test]
    fn test_catalog_covers_every_operation() {
        let tools = tool_catalog();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, ALL_TOOLS);
        for tool in &tools {
            let schema = &tool.input_schema;
            assert_eq!(
                schema.get("type").and_then(|v| v.as_str()),
                Some("object"),
                "schema for {} is not an object",
                tool.name
            );
        }
    }

    #[test]
    fn test_required_str_rejects_missing_and_blank() {
        let mut args = Map::new();
        assert!(required_str(&args, "query").is_err());

        args.insert("query".to_string(), Value::String("   ".to_string()));
        assert!(required_str(&args, "query").is_err());

        args.insert("query".to_string(), Value::String(" milk ".to_string()));
        assert_eq!(required_str(&args, "query").unwrap(), "milk");
    }

    #[test]
    fn test_take_list_tolerates_missing_key() {
        let notes: Vec<NoteSummary> = take_list(json!({}), "notes").unwrap();
        assert!(notes.is_empty());

        let notes: Vec<NoteSummary> = take_list(json!({ "notes": null }), "notes").unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn test_take_record_requires_the_key() {
        let err = take_record::<Note>(json!({}), "note").unwrap_err();
        assert!(matches!(err, JotterError::ScriptOutput(_)));
    }

    #[tokio::test]
    async fn test_missing_required_arg_is_invalid_params() {
        let connector = AppleNotesConnector::new(Config::default());
        let err = connector
            .call_tool(CallToolRequestParam {
                name: "get_note".into(),
                arguments: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, JotterError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_rejected() {
        let connector = AppleNotesConnector::new(Config::default());
        let err = connector
            .call_tool(CallToolRequestParam {
                name: "open_portal".into(),
                arguments: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, JotterError::ToolNotFound));
    }

    #[tokio::test]
    async fn test_initialize_reports_tool_capability() {
        let connector = AppleNotesConnector::new(Config::default());
        let request: InitializeRequestParam = serde_json::from_value(json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "test-client", "version": "0.0.0" }
        }))
        .unwrap();
        let init = connector.initialize(request).await.unwrap();
        assert!(init.capabilities.tools.is_some());
        assert_eq!(init.server_info.name, "jotter");
    }
}
