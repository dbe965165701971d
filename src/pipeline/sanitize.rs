//! Cleanup of model-produced field values before they land in a document.
//!
//! Model output is imperfect: fields sometimes arrive as JSON arrays instead
//! of strings, and the text carries markdown bold markers or stray
//! Python-style list remnants. Every value passes through here on its way
//! into the template.

use serde_json::Value;

/// Junk substrings removed wherever they occur.
const JUNK: [&str; 5] = ["**", "['", "']", "[\"", "\"]"];

/// Coerce a JSON value to text. Arrays join their elements with newlines;
/// strings pass through; everything else renders via its JSON form.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(item_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn item_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Strip junk substrings anywhere in the text and trim surrounding
/// whitespace. Idempotent.
pub fn clean_text(text: &str) -> String {
    let mut cleaned = text.to_string();
    for junk in JUNK {
        cleaned = cleaned.replace(junk, "");
    }
    cleaned.trim().to_string()
}
