//! Column codecs shared by the MySQL repositories.

use crate::shared::error::AppError;

/// Escape `LIKE` wildcards and wrap the term for substring matching.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.trim().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Decode a JSON string array stored in a TEXT column.
pub(crate) fn decode_list(column: &str, raw: &str) -> Result<Vec<String>, AppError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
        .map_err(|e| AppError::Internal(format!("Corrupt JSON in column {}: {}", column, e)))
}

pub(crate) fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_json(column: &str, raw: &str) -> Result<serde_json::Value, AppError> {
    if raw.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(raw)
        .map_err(|e| AppError::Internal(format!("Corrupt JSON in column {}: {}", column, e)))
}

pub(crate) fn unknown_value(column: &str, value: &str) -> AppError {
    AppError::Internal(format!("Unknown value '{}' in column {}", value, column))
}
