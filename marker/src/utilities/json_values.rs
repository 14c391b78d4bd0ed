//! Lenient readers for loosely typed JSON content.
//!
//! Task content and stored answers come from two editors that never agreed on a format, so
//! indices show up as numbers or numeric strings and arrays sometimes arrive JSON-encoded
//! inside a string. These helpers accept every shape seen in stored data and return `None`
//! for anything else; callers decide whether that means "absent" or "malformed".

use serde_json::Value;

/// Reads a non-negative integer index from a number or a numeric string.
pub fn read_index(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return usize::try_from(u).ok();
            }
            // 2.0 is accepted, 2.5 is not
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as usize)
        }
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    }
}

/// Reads an array where every element is an index. One bad element rejects the whole list.
pub fn read_index_list(value: &Value) -> Option<Vec<usize>> {
    value.as_array()?.iter().map(read_index).collect()
}

/// Reads an array of strings; numbers are converted to their decimal text.
pub fn read_string_list(value: &Value) -> Option<Vec<String>> {
    value.as_array()?.iter().map(read_text).collect()
}

/// Reads a string, or the decimal text of a number.
pub fn read_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads `points`, falling back to 1 for anything that is not a positive finite number.
pub fn read_points(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if p.is_finite() && p > 0.0 => p,
        _ => 1.0,
    }
}

/// Decodes a string that holds a JSON array or object. Other strings are returned unchanged.
pub fn decode_embedded_json(value: &Value) -> Value {
    if let Value::String(s) = value {
        let trimmed = s.trim();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            if let Ok(decoded) = serde_json::from_str::<Value>(trimmed) {
                return decoded;
            }
        }
    }
    value.clone()
}
