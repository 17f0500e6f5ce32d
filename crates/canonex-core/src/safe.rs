//! Typed, non-panicking field extraction from untyped provider JSON.
//!
//! Every accessor returns `None` when the key is missing, the value is
//! `null`, or the value has a shape that cannot be read as the requested
//! kind. None of them ever substitute a zero or empty default, so callers
//! can always tell "unknown" apart from "zero".
//!
//! Exchanges routinely encode decimals as JSON strings (`"0.001"`), so the
//! numeric accessors accept both JSON numbers and numeric strings.

use serde_json::Value;

/// Returns the raw value stored under `key`, treating `null` as absent.
pub fn safe_value<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    match record.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Reads `key` as a string. Numbers are rendered with their JSON text.
pub fn safe_string(record: &Value, key: &str) -> Option<String> {
    match safe_value(record, key)? {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

/// Reads `key` as an integer, truncating fractional numbers toward zero.
pub fn safe_integer(record: &Value, key: &str) -> Option<i64> {
    match safe_value(record, key)? {
        Value::Number(value) => value
            .as_i64()
            .or_else(|| value.as_f64().and_then(truncate_to_i64)),
        Value::String(value) => parse_integer(value),
        _ => None,
    }
}

/// Reads `key` as a finite float.
pub fn safe_float(record: &Value, key: &str) -> Option<f64> {
    match safe_value(record, key)? {
        Value::Number(value) => value.as_f64().filter(|parsed| parsed.is_finite()),
        Value::String(value) => parse_float(value),
        _ => None,
    }
}

/// Reads `key` as a non-negative integer that fits in `u32`.
///
/// Decimal counts and confirmation counts use this; a negative or oversized
/// value is treated as mistyped rather than clamped.
pub fn safe_count(record: &Value, key: &str) -> Option<u32> {
    safe_integer(record, key).and_then(|value| u32::try_from(value).ok())
}

fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| parse_float(trimmed).and_then(truncate_to_i64))
}

fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

fn truncate_to_i64(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }

    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}
