// Field-level sanitization helpers shared by every entity strategy.
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Trim and clamp a string to `max` characters, respecting char boundaries.
pub fn clamp_chars(s: &str, max: usize) -> String {
    let trimmed = s.trim();
    if trimmed.chars().count() <= max {
        trimmed.to_string()
    } else {
        trimmed.chars().take(max).collect()
    }
}

/// Required non-empty string field; missing, non-string or blank is a 400.
pub fn required_string(
    obj: &Map<String, Value>,
    field: &str,
    max: usize,
) -> Result<String, ApiError> {
    match obj.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(clamp_chars(s, max)),
        _ => Err(ApiError::bad_request(format!(
            "Missing required field: {}",
            field
        ))),
    }
}

/// Optional string field; absent, non-string or blank becomes `None`.
pub fn optional_string(obj: &Map<String, Value>, field: &str, max: usize) -> Option<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(|s| clamp_chars(s, max))
        .filter(|s| !s.is_empty())
}

/// Coerce a boolean field, defaulting when absent or not a bool.
pub fn bool_or(obj: &Map<String, Value>, field: &str, default: bool) -> bool {
    obj.get(field).and_then(Value::as_bool).unwrap_or(default)
}

/// Integer field clamped into `[min, max]`, defaulting when absent.
pub fn int_clamped(obj: &Map<String, Value>, field: &str, min: i64, max: i64, default: i64) -> i64 {
    obj.get(field)
        .and_then(Value::as_i64)
        .unwrap_or(default)
        .clamp(min, max)
}

/// Sanitize an array-of-strings field into at most `max_items` cleaned entries.
pub fn string_list(
    obj: &Map<String, Value>,
    field: &str,
    max_items: usize,
    max_len: usize,
) -> Option<Vec<String>> {
    let items = obj.get(field)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| clamp_chars(s, max_len))
            .filter(|s| !s.is_empty())
            .take(max_items)
            .collect(),
    )
}

/// Loose structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Deliverability is not our problem.
pub fn is_valid_email(s: &str) -> bool {
    if s.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = s.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}
