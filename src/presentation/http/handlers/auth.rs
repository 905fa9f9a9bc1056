//! Admin Authentication Handlers

use axum::{extract::State, Json};

use crate::application::dto::request::LoginRequest;
use crate::application::dto::response::{AdminResponse, ApiResponse, TokenResponse};
use crate::presentation::http::extractors::ValidatedJson;
use crate::presentation::middleware::AdminUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Login with admin credentials
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let session = state.auth.login(&body.username, &body.password).await?;
    Ok(Json(ApiResponse::ok(TokenResponse::from(session))))
}

/// Current admin from the bearer token
pub async fn me(admin: AdminUser) -> Json<ApiResponse<AdminResponse>> {
    Json(ApiResponse::ok(AdminResponse {
        id: admin.admin_id.to_string(),
        username: admin.username,
        role: admin.role,
        expires_at: admin.expires_at,
    }))
}
