// src/error.rs
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum JotterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Script produced no parseable output: {0}")]
    ScriptOutput(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Tool not found")]
    ToolNotFound,

    #[error("Method not found")]
    MethodNotFound,

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl JotterError {
    pub fn to_jsonrpc_error(&self) -> serde_json::Value {
        let (code, message) = match self {
            JotterError::NoteNotFound(msg) => (-32602, format!("Note not found: {}", msg)),
            JotterError::FolderNotFound(msg) => (-32602, format!("Folder not found: {}", msg)),
            JotterError::ToolNotFound => (-32602, "Tool not found".to_string()),
            JotterError::InvalidParams(msg) => (-32602, msg.to_string()),
            JotterError::MethodNotFound => (-32601, "Method not found".to_string()),
            JotterError::Internal(msg) => (-32603, msg.to_string()),
            err => (-32603, err.to_string()),
        };

        json!({
            "code": code,
            "message": message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_params_maps_to_invalid_params_code() {
        let err = JotterError::InvalidParams("Missing 'note_id'".to_string());
        let rpc = err.to_jsonrpc_error();
        assert_eq!(rpc["code"], -32602);
        assert_eq!(rpc["message"], "Missing 'note_id'");
    }

    #[test]
    fn method_not_found_maps_to_32601() {
        let rpc = JotterError::MethodNotFound.to_jsonrpc_error();
        assert_eq!(rpc["code"], -32601);
    }

    #[test]
    fn script_failures_map_to_internal_code() {
        let rpc = JotterError::Script("Notes got an error".to_string()).to_jsonrpc_error();
        assert_eq!(rpc["code"], -32603);
        let rpc =
            JotterError::Timeout("script timed out after 30000ms".to_string()).to_jsonrpc_error();
        assert_eq!(rpc["code"], -32603);
    }

    #[test]
    fn not_found_variants_carry_the_id() {
        let rpc = JotterError::NoteNotFound("x-coredata://abc/p42".to_string()).to_jsonrpc_error();
        assert_eq!(rpc["code"], -32602);
        assert!(rpc["message"]
            .as_str()
            .unwrap()
            .contains("x-coredata://abc/p42"));
    }
}
