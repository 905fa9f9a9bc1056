//! Contact Query Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{QueryListQuery, QueryRequest, ResolveRequest};
use crate::application::dto::response::{ApiResponse, SubmissionResponse};
use crate::domain::{CustomerQuery, Pagination};
use crate::presentation::http::extractors::{ApiQuery, PathId, ValidatedJson};
use crate::presentation::http::handlers::{created, Created};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Contact form submission
pub async fn submit(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<QueryRequest>,
) -> Result<Created<SubmissionResponse>, AppError> {
    let query = state.queries().submit(body).await?;
    Ok(created(SubmissionResponse::from(query)))
}

pub async fn admin_list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<QueryListQuery>,
) -> Result<Json<ApiResponse<Vec<CustomerQuery>>>, AppError> {
    let page = state
        .queries()
        .list(query.resolved, Pagination::new(query.page, query.per_page))
        .await?;
    Ok(Json(ApiResponse::paged(page)))
}

/// Mark a query resolved, or reopen it with `{"resolved": false}`
pub async fn admin_resolve(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(body): ValidatedJson<ResolveRequest>,
) -> Result<Json<ApiResponse<CustomerQuery>>, AppError> {
    Ok(Json(ApiResponse::ok(
        state.queries().resolve(id, body.resolved).await?,
    )))
}

pub async fn admin_delete(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    state.queries().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
