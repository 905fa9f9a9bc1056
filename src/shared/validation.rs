//! Validation Utilities

use rust_decimal::Decimal;
use validator::{Validate, ValidationErrors};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    let message = field_errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation {
        message,
        errors: field_errors,
    }
}

/// Run `validator` rules on a request body.
pub fn validate<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(validation_error)
}

/// Normalise and check a three-letter IATA airport code.
pub fn iata_code(field: &str, raw: &str) -> Result<String, AppError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(AppError::invalid_field(field, "Must be a 3-letter IATA code"))
    }
}

/// Parse a snowflake id sent as a string.
pub fn snowflake_id(field: &str, raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::invalid_field(field, "Invalid ID"))
}

/// Trim optional text, dropping it when blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reject negative amounts.
pub fn non_negative(field: &str, amount: Decimal) -> Result<Decimal, AppError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        Err(AppError::invalid_field(field, "Must not be negative"))
    } else {
        Ok(amount)
    }
}

/// Parse an optional amount from a query string. Blank means absent.
pub fn optional_amount(field: &str, raw: Option<&str>) -> Result<Option<Decimal>, AppError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<Decimal>()
            .map_err(|_| AppError::invalid_field(field, "Must be a number"))
            .and_then(|amount| non_negative(field, amount))
            .map(Some),
    }
}
