//! Type inference for raw CSV cells.
//!
//! Values are sniffed in a fixed order (integer, float, boolean, string) and
//! the first match wins, so `"1"` is always the integer `1` and never the
//! string `"1"`.

use serde::Serialize;

const TRUE_WORDS: [&str; 5] = ["true", "t", "y", "yes", "on"];
const FALSE_WORDS: [&str; 5] = ["false", "f", "n", "no", "off"];

/// A converted configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
    Str(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Coerce a raw cell into the most specific plausible type.
pub fn convert(raw: &str) -> Value {
    let trimmed = raw.trim();

    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Int(int);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        return Value::Float(float);
    }
    if let Some(flag) = to_bool(trimmed) {
        return Value::Bool(flag);
    }

    Value::Str(trimmed.to_string())
}

/// Re-run coercion on a value that may already be typed. Only strings are
/// sniffed; every other variant passes through unchanged.
pub fn convert_value(value: Value) -> Value {
    match value {
        Value::Str(s) => convert(&s),
        other => other,
    }
}

/// Split a comma-separated cell into trimmed, non-empty pieces.
pub fn convert_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

fn to_bool(s: &str) -> Option<bool> {
    let lower = s.to_lowercase();
    if TRUE_WORDS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}
