// Subprocess plumbing tests using shell stand-ins for the osascript interpreter.

use jotter_core::notes::osa::OsaRunner;
use jotter_core::JotterError;
use serde_json::json;
use std::time::Duration;

fn shim(script: &str) -> OsaRunner {
    OsaRunner::with_command("sh", &["-c", script], Duration::from_secs(5))
}

#[tokio::test]
async fn test_stdin_is_piped_to_the_interpreter() {
    // cat echoes the piped script, so the "result" is the source itself
    let runner = shim("cat");
    let value = runner.run(r#"{"ok": true, "n": 3}"#).await.unwrap();
    assert_eq!(value, json!({"ok": true, "n": 3}));
}

#[tokio::test]
async fn test_stderr_json_is_accepted() {
    let runner = shim(r#"cat >/dev/null; echo '{"from": "stderr"}' 1>&2"#);
    let value = runner.run("ignored").await.unwrap();
    assert_eq!(value["from"], "stderr");
}

#[tokio::test]
async fn test_timeout_kills_the_run() {
    let runner = OsaRunner::with_command("sh", &["-c", "sleep 5"], Duration::from_millis(50));
    let err = runner.run("ignored").await.unwrap_err();
    assert!(matches!(err, JotterError::Timeout(_)));
}

#[tokio::test]
async fn test_nonzero_exit_without_json_is_a_script_error() {
    let runner = shim("cat >/dev/null; echo boom 1>&2; exit 3");
    let err = runner.run("ignored").await.unwrap_err();
    match err {
        JotterError::Script(msg) => {
            assert!(msg.contains("code 3"));
            assert!(msg.contains("boom"));
        }
        other => panic!("expected script error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_envelope_maps_to_typed_error() {
    let runner = shim(
        r#"cat >/dev/null; echo '{"error": {"message": "No note with id x", "kind": "note_not_found"}}'"#,
    );
    let err = runner.run("ignored").await.unwrap_err();
    assert!(matches!(err, JotterError::NoteNotFound(_)));
}

#[tokio::test]
async fn test_silent_success_yields_null() {
    let runner = shim("cat >/dev/null");
    let value = runner.run("ignored").await.unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn test_garbage_output_is_rejected() {
    let runner = shim("cat >/dev/null; echo something went wrong");
    let err = runner.run("ignored").await.unwrap_err();
    assert!(matches!(err, JotterError::ScriptOutput(_)));
}
