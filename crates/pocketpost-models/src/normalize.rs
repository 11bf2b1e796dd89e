//! Read-side tolerance for legacy value encodings.
//!
//! The historical update path wrote every attribute as a string, so the table
//! contains `"true"`/`"True"` flags, `"3"` counts, and JSON-encoded-array
//! strings next to properly typed values. All consumers normalize through
//! these helpers instead of parsing ad hoc at each read site. Writers always
//! persist native JSON types; only pre-existing rows exercise the string
//! paths.

use serde_json::Value;

/// Boolean flag: `true`, or a string matching `"true"` case-insensitively.
/// Absent or anything else is `false`.
pub fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Non-negative count: JSON number or decimal string. Absent, malformed, or
/// negative is 0.
pub fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// Identity set: JSON array of strings, or a JSON-encoded array string.
/// Deduplicates preserving first-seen order; absent or malformed is empty.
pub fn id_set(value: Option<&Value>) -> Vec<String> {
    let items = match value {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    let mut seen = Vec::new();
    for item in items {
        if let Value::String(identity) = item
            && !seen.contains(&identity)
        {
            seen.push(identity);
        }
    }
    seen
}

/// Embedded list field: JSON array, or a JSON-encoded array string. Decode
/// failure yields an empty list (callers warn where that matters).
pub fn value_list(value: Option<&Value>) -> Result<Vec<Value>, serde_json::Error> {
    match value {
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s)? {
            Value::Array(items) => Ok(items),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}
