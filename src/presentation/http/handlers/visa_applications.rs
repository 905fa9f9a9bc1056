//! Visa Application Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{
    StatusListQuery, StatusUpdateRequest, VisaApplicationRequest,
};
use crate::application::dto::response::{ApiResponse, SubmissionResponse};
use crate::domain::{Pagination, VisaApplication};
use crate::presentation::http::extractors::{ApiQuery, PathId, ValidatedJson};
use crate::presentation::http::handlers::{created, Created};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Visa application from the public site
pub async fn submit(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<VisaApplicationRequest>,
) -> Result<Created<SubmissionResponse>, AppError> {
    let application = state.visa_applications().submit(body).await?;
    Ok(created(SubmissionResponse::from(application)))
}

pub async fn admin_list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatusListQuery>,
) -> Result<Json<ApiResponse<Vec<VisaApplication>>>, AppError> {
    let page = state
        .visa_applications()
        .list(
            query.status.as_deref(),
            Pagination::new(query.page, query.per_page),
        )
        .await?;
    Ok(Json(ApiResponse::paged(page)))
}

pub async fn admin_get(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<VisaApplication>>, AppError> {
    Ok(Json(ApiResponse::ok(
        state.visa_applications().get(id).await?,
    )))
}

pub async fn admin_update_status(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(body): ValidatedJson<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<VisaApplication>>, AppError> {
    let application = state
        .visa_applications()
        .change_status(id, &body.status)
        .await?;
    Ok(Json(ApiResponse::ok(application)))
}

pub async fn admin_delete(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    state.visa_applications().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
