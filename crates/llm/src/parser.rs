//! Agent Response Parser
//!
//! Agents are asked for "JSON only" but regularly wrap it in prose or
//! markdown fences. The parser takes the widest `{ ... }` span (first opening
//! brace to last closing brace) and parses that; anything unparsable, or any
//! JSON value that is not an object, becomes an empty object.

use serde_json::{Map, Value};

/// Extract the greedy `{ ... }` span of `text`, if it has one.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start <= end {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Parse agent output into a JSON object. Never fails.
pub fn parse_agent_json(text: &str) -> Map<String, Value> {
    let candidate = extract_json_object(text).unwrap_or(text).trim();
    if candidate.is_empty() {
        return Map::new();
    }

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::debug!(
                "[Parser] Agent returned JSON {} instead of an object",
                json_kind(&other)
            );
            Map::new()
        }
        Err(e) => {
            tracing::warn!(
                "[Parser] Could not parse agent output ({} chars): {}",
                text.len(),
                e
            );
            Map::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
