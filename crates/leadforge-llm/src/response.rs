//! Provider envelope extraction and tolerant JSON recovery from model text.

use leadforge_copy::normalize_text;
use leadforge_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```(?:json)?\s*(.*?)```").unwrap());

/// Pull the model's text out of a provider response.
///
/// Accepts the flat `output_text` field, the nested
/// `output[].content[].text` list (joined with newlines) and the
/// chat-completions `choices[0].message.content`. Returns an empty string
/// when none is present.
pub fn extract_response_text(payload: &Value) -> String {
    if let Some(text) = payload.get("output_text").and_then(Value::as_str) {
        if !text.trim().is_empty() {
            return text.to_string();
        }
    }

    if let Some(output) = payload.get("output").and_then(Value::as_array) {
        let chunks: Vec<&str> = output
            .iter()
            .filter_map(|entry| entry.get("content").and_then(Value::as_array))
            .flatten()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();
        if !chunks.is_empty() {
            return chunks.join("\n");
        }
    }

    payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Locate and parse the JSON object inside free-form model text.
///
/// Tries a fenced code block first, then the span from the first `{` to
/// the last `}`, then the whole text.
pub fn parse_json_from_model_text(text: &str) -> Result<Value> {
    let raw = normalize_text(text);
    if raw.is_empty() {
        return Err(Error::Parse("OpenAI returned empty output.".into()));
    }

    let from_fence = FENCED_BLOCK
        .captures(&raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty());
    let from_braces = match (raw.find('{'), raw.rfind('}')) {
        (Some(first), Some(last)) if last > first => Some(&raw[first..=last]),
        _ => None,
    };
    let candidate = from_fence.or(from_braces).unwrap_or(raw.as_str());

    serde_json::from_str(candidate)
        .map_err(|e| Error::Parse(format!("OpenAI returned invalid JSON: {}", e)))
}
