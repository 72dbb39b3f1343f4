use crate::error::JotterError;
use rmcp::model::CallToolResult;
use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Payload keys that hold result lists. An empty list under one of these gets
/// a human-readable no-results message attached.
const RESULT_LIST_KEYS: &[&str] = &["notes", "results", "folders"];

const COUNT_KEYS: &[&str] = &["count", "total_count"];

const QUERY_FIELD_KEYS: &[&str] = &["query", "q", "term"];

fn build_no_results_message(key: &str, query_hint: Option<String>) -> String {
    let label = match key {
        "results" | "count" | "total_count" => "results".to_string(),
        other => other.replace('_', " "),
    };

    match query_hint {
        Some(query) => format!("No {} found for \"{}\".", label, query),
        None => format!("No {} found for the requested input.", label),
    }
}

fn maybe_attach_no_results_message(map: &mut JsonMap<String, JsonValue>) -> Option<String> {
    // Any non-empty result list means we have data and should not set a no-results message.
    for key in RESULT_LIST_KEYS {
        if let Some(JsonValue::Array(items)) = map.get(*key) {
            if !items.is_empty() {
                return None;
            }
        }
    }

    // Capture a query hint if the payload includes one.
    let query_hint = map
        .iter()
        .find_map(|(key, value)| {
            if QUERY_FIELD_KEYS.iter().any(|candidate| candidate == key) {
                value.as_str().map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .filter(|s| !s.is_empty());

    let mut message: Option<String> = None;

    for key in RESULT_LIST_KEYS {
        if let Some(value) = map.get(*key) {
            match value {
                JsonValue::Array(items) if items.is_empty() => {
                    message = Some(build_no_results_message(key, query_hint.clone()));
                    break;
                }
                JsonValue::Null => {
                    message = Some(build_no_results_message(key, query_hint.clone()));
                    break;
                }
                _ => {}
            }
        }
    }

    if message.is_none() {
        for key in COUNT_KEYS {
            if let Some(value) = map.get(*key) {
                if value.as_u64() == Some(0) {
                    message = Some(build_no_results_message("results", query_hint.clone()));
                    break;
                }
            }
        }
    }

    if let Some(message_text) = message.clone() {
        map.entry("message".to_string())
            .or_insert(JsonValue::String(message_text.clone()));
        map.entry("no_results".to_string())
            .or_insert(JsonValue::Bool(true));
    }

    message
}

/// Build a CallToolResult that carries only structured JSON (no text fallback).
/// This prioritizes first-class machine-readable results for modern MCP clients.
pub fn structured_result<T: Serialize>(data: &T) -> Result<CallToolResult, JotterError> {
    let value = serde_json::to_value(data)?;

    // Convert to an object map; if it's not an object, wrap under a `data` key.
    let mut map: JsonMap<String, JsonValue> = match value {
        JsonValue::Object(m) => m,
        other => {
            let mut m = JsonMap::new();
            m.insert("data".to_string(), other);
            m
        }
    };

    maybe_attach_no_results_message(&mut map);

    Ok(CallToolResult {
        content: Vec::new(),
        structured_content: Some(JsonValue::Object(map)),
        is_error: Some(false),
        meta: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn structured_map(result: &CallToolResult) -> &JsonMap<String, JsonValue> {
        result
            .structured_content
            .as_ref()
            .and_then(|v| v.as_object())
            .unwrap()
    }

    #[test]
    fn empty_note_list_gets_a_message() {
        let result = structured_result(&json!({"notes": [], "count": 0})).unwrap();
        let map = structured_map(&result);
        assert_eq!(map.get("no_results"), Some(&JsonValue::Bool(true)));
        assert_eq!(
            map.get("message").and_then(|v| v.as_str()),
            Some("No notes found for the requested input.")
        );
    }

    #[test]
    fn query_hint_lands_in_the_message() {
        let result =
            structured_result(&json!({"results": [], "count": 0, "query": "groceries"})).unwrap();
        let map = structured_map(&result);
        assert_eq!(
            map.get("message").and_then(|v| v.as_str()),
            Some("No results found for \"groceries\".")
        );
    }

    #[test]
    fn populated_list_is_left_alone() {
        let result = structured_result(&json!({"notes": [{"id": "x"}], "count": 1})).unwrap();
        let map = structured_map(&result);
        assert!(!map.contains_key("message"));
        assert!(!map.contains_key("no_results"));
        assert_eq!(result.is_error, Some(false));
        assert!(result.content.is_empty());
    }

    #[test]
    fn single_record_payloads_never_gain_a_message() {
        let result = structured_result(&json!({"note": {"id": "x", "title": "t"}})).unwrap();
        let map = structured_map(&result);
        assert!(!map.contains_key("no_results"));
    }

    #[test]
    fn non_object_payload_is_wrapped() {
        let result = structured_result(&json!(["a", "b"])).unwrap();
        let map = structured_map(&result);
        assert!(map.get("data").map(|v| v.is_array()).unwrap_or(false));
    }
}
