//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::application::dto::response::ApiResponse;

pub mod admin_catalog;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod flights;
pub mod health;
pub mod queries;
pub mod settings;
pub mod visa_applications;

/// `201 Created` with the usual envelope.
pub type Created<T> = (StatusCode, Json<ApiResponse<T>>);

pub(crate) fn created<T: Serialize>(data: T) -> Created<T> {
    (StatusCode::CREATED, Json(ApiResponse::ok(data)))
}
