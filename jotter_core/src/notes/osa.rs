// Script execution - pipes generated JXA through the osascript interpreter
// Scripts emit their result as JSON on stdout (or stderr via console.log)
// macOS only unless the command is overridden

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde_json::Value;

use crate::config::Config;
use crate::error::JotterError;

pub const OSASCRIPT: &str = "/usr/bin/osascript";

/// Captured output of one interpreter run.
#[derive(Debug, Clone)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl RawOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs JXA sources through `osascript -l JavaScript -`.
#[derive(Debug, Clone)]
pub struct OsaRunner {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
    overridden: bool,
}

impl OsaRunner {
    pub fn new(config: &Config) -> Self {
        let overridden = config.osascript_path.is_some();
        let program = config
            .osascript_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(OSASCRIPT));
        Self {
            program,
            args: vec!["-l".to_string(), "JavaScript".to_string(), "-".to_string()],
            timeout: config.script_timeout(),
            overridden,
        }
    }

    /// Run an arbitrary command in place of osascript. Overridden runners skip
    /// the macOS check, so stand-in interpreters work on any host.
    pub fn with_command(program: impl Into<PathBuf>, args: &[&str], timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
            timeout,
            overridden: true,
        }
    }

    /// Execute a script and parse its JSON result.
    pub async fn run(&self, source: &str) -> Result<Value, JotterError> {
        if !self.overridden && !cfg!(target_os = "macos") {
            return Err(JotterError::Unsupported(
                "Apple Notes automation requires macOS".to_string(),
            ));
        }

        let raw = self.capture(source).await?;
        tracing::debug!(exit_code = raw.exit_code, "interpreter finished");
        parse_script_output(&raw)
    }

    async fn capture(&self, source: &str) -> Result<RawOutput, JotterError> {
        use tokio::io::AsyncWriteExt;
        use tokio::process::Command;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // A timeout drops the wait future below; the child must die with it.
        cmd.kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            JotterError::Script(format!("Failed to spawn {}: {}", self.program.display(), e))
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .await
                .map_err(|e| JotterError::Script(format!("Failed to write script: {}", e)))?;
            // Dropping stdin closes the pipe so the interpreter starts reading.
        }

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                JotterError::Script(format!("Failed to wait for interpreter: {}", e))
            })?,
            Err(_) => {
                return Err(JotterError::Timeout(format!(
                    "script did not finish within {}ms",
                    self.timeout.as_millis()
                )))
            }
        };

        Ok(RawOutput {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

/// Interpret captured interpreter output.
///
/// Either channel may carry the JSON result: JXA `JSON.stringify` lands on
/// stdout, `console.log` on stderr. A payload with an `error` member is a
/// script-level failure and maps to a typed error.
pub fn parse_script_output(raw: &RawOutput) -> Result<Value, JotterError> {
    let payload = parse_json_channel(&raw.stdout).or_else(|| parse_json_channel(&raw.stderr));

    if let Some(value) = payload {
        if let Some(err) = value.get("error") {
            return Err(error_from_payload(err));
        }
        return Ok(value);
    }

    if !raw.success() {
        let detail = if raw.stderr.is_empty() {
            &raw.stdout
        } else {
            &raw.stderr
        };
        return Err(JotterError::Script(format!(
            "interpreter exited with code {}: {}",
            raw.exit_code,
            preview(detail)
        )));
    }

    if raw.stdout.is_empty() && raw.stderr.is_empty() {
        return Ok(Value::Null);
    }

    let detail = if raw.stdout.is_empty() {
        &raw.stderr
    } else {
        &raw.stdout
    };
    Err(JotterError::ScriptOutput(format!(
        "expected JSON, got: {}",
        preview(detail)
    )))
}

fn parse_json_channel(channel: &str) -> Option<Value> {
    let trimmed = channel.trim();
    if trimmed.is_empty() {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}

fn error_from_payload(err: &Value) -> JotterError {
    let message = err
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("script error")
        .to_string();
    match err.get("kind").and_then(|v| v.as_str()) {
        Some("note_not_found") => JotterError::NoteNotFound(message),
        Some("folder_not_found") => JotterError::FolderNotFound(message),
        _ => JotterError::Script(message),
    }
}

fn preview(text: &str) -> String {
    const MAX: usize = 200;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(stdout: &str, stderr: &str, exit_code: i32) -> RawOutput {
        RawOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code,
        }
    }

    #[test]
    fn test_parse_stdout_json() {
        let value = parse_script_output(&raw(r#"{"notes": []}"#, "", 0)).unwrap();
        assert!(value.get("notes").is_some());
    }

    #[test]
    fn test_parse_stderr_json_fallback() {
        let value = parse_script_output(&raw("", r#"{"folders": [{"name": "Inbox"}]}"#, 0)).unwrap();
        assert!(value.get("folders").is_some());
    }

    #[test]
    fn test_stdout_wins_over_stderr() {
        let value = parse_script_output(&raw(r#"{"from": "stdout"}"#, r#"{"from": "stderr"}"#, 0))
            .unwrap();
        assert_eq!(value.get("from").and_then(|v| v.as_str()), Some("stdout"));
    }

    #[test]
    fn test_error_payload_maps_to_note_not_found() {
        let err = parse_script_output(&raw(
            r#"{"error": {"message": "No note with id x", "kind": "note_not_found"}}"#,
            "",
            0,
        ))
        .unwrap_err();
        assert!(matches!(err, JotterError::NoteNotFound(_)));
    }

    #[test]
    fn test_error_payload_maps_to_folder_not_found() {
        let err = parse_script_output(&raw(
            r#"{"error": {"message": "No folder named Foo", "kind": "folder_not_found"}}"#,
            "",
            0,
        ))
        .unwrap_err();
        assert!(matches!(err, JotterError::FolderNotFound(_)));
    }

    #[test]
    fn test_unknown_error_kind_is_a_script_error() {
        let err = parse_script_output(&raw(r#"{"error": {"message": "boom"}}"#, "", 0)).unwrap_err();
        match err {
            JotterError::Script(msg) => assert_eq!(msg, "boom"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_nonzero_exit_without_json() {
        let err = parse_script_output(&raw("", "syntax error near line 1", 1)).unwrap_err();
        match err {
            JotterError::Script(msg) => assert!(msg.contains("syntax error")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_success_is_null() {
        let value = parse_script_output(&raw("", "", 0)).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_non_json_output_is_a_parse_failure() {
        let err = parse_script_output(&raw("hello from osascript", "", 0)).unwrap_err();
        assert!(matches!(err, JotterError::ScriptOutput(_)));
    }
}
