//! Site Settings Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::response::ApiResponse;
use crate::domain::SettingsMap;
use crate::presentation::middleware::AdminUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Every setting, private ones included
pub async fn admin_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SettingsMap>>, AppError> {
    Ok(Json(ApiResponse::ok(state.site_settings().all().await?)))
}

/// Upsert the given keys and return the full map
pub async fn admin_update(
    State(state): State<AppState>,
    admin: AdminUser,
    payload: Result<Json<SettingsMap>, JsonRejection>,
) -> Result<Json<ApiResponse<SettingsMap>>, AppError> {
    let Json(values) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if values.is_empty() {
        return Err(AppError::BadRequest("No settings given".into()));
    }
    let keys = values.len();
    let settings = state.site_settings().update(values).await?;
    tracing::debug!(admin = %admin.username, keys, "Settings change requested");
    Ok(Json(ApiResponse::ok(settings)))
}

pub async fn admin_delete(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    state.site_settings().delete(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
