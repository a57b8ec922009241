//! Comment text coercion and normalization.

use serde_json::Value;

/// Converts a loosely typed comment value into text.
///
/// Exports from social platforms often carry numbers, booleans or nulls in
/// the comment column. These are stringified instead of rejected: `null`
/// becomes `"None"` and booleans become `"True"`/`"False"`.
pub fn comment_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Lower-cases comment text for matching.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Counts whitespace-separated tokens.
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}
