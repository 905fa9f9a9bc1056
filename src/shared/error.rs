//! Application Error Types
//!
//! Centralized error handling with Axum integration. Every failure leaves
//! the API as `{ "success": false, "code", "message", "errors"? }`.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited")]
    RateLimited { retry_after: u64 },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
}

impl AppError {
    /// Validation failure on a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        AppError::Validation {
            message: format!("{}: {}", field, message),
            errors: vec![FieldError {
                field: field.to_string(),
                message,
            }],
        }
    }

    /// Stable numeric error code exposed to clients.
    pub fn code(&self) -> u16 {
        match self {
            AppError::Internal(_) | AppError::Database(_) => 10000,
            AppError::NotFound(_) => 10001,
            AppError::BadRequest(_) => 10002,
            AppError::Unauthorized(_) => 10003,
            AppError::Forbidden(_) => 10004,
            AppError::Conflict(_) => 10005,
            AppError::RateLimited { .. } => 10006,
            AppError::Validation { .. } => 10007,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, errors) = match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error".to_string(), None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ("Internal server error".to_string(), None)
            }
            AppError::RateLimited { retry_after } => {
                let body = ErrorResponse {
                    success: false,
                    code,
                    message: "Too many requests, slow down".into(),
                    errors: None,
                };
                let mut response = (status, Json(body)).into_response();
                if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }
                return response;
            }
            AppError::Validation { message, errors } => {
                (message, if errors.is_empty() { None } else { Some(errors) })
            }
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg) => (msg, None),
        };

        let body = ErrorResponse {
            success: false,
            code,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

/// Map a unique-key violation to `Conflict`, everything else to `Database`.
pub fn map_unique_violation(e: sqlx::Error, conflict_message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(conflict_message.to_string())
        }
        _ => AppError::Database(e),
    }
}
