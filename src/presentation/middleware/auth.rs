//! Authentication Middleware
//!
//! Bearer token validation for the admin API.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};

use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated admin extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub admin_id: i64,
    pub username: String,
    pub role: String,
    pub expires_at: i64,
}

/// Authentication middleware that validates admin tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.map_err(|rejection| {
        if rejection.is_missing() {
            AppError::Unauthorized("Missing authorization header".into())
        } else {
            AppError::Unauthorized("Invalid authorization header format".into())
        }
    })?;

    let token = bearer.token().trim();
    if token.is_empty() {
        return Err(AppError::Unauthorized("Invalid authorization header format".into()));
    }

    let claims = state.auth.verify_token(token)?;
    let admin_id = claims
        .admin_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid token claims".into()))?;

    request.extensions_mut().insert(AdminUser {
        admin_id,
        username: claims.username,
        role: claims.role,
        expires_at: claims.exp,
    });

    Ok(next.run(request).await)
}
