//! Booking Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{BookingRequest, StatusListQuery, StatusUpdateRequest};
use crate::application::dto::response::{ApiResponse, SubmissionResponse};
use crate::domain::{Booking, Pagination};
use crate::presentation::http::extractors::{ApiQuery, PathId, ValidatedJson};
use crate::presentation::http::handlers::{created, Created};
use crate::presentation::middleware::AdminUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Booking request from the public site
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<BookingRequest>,
) -> Result<Created<SubmissionResponse>, AppError> {
    let booking = state.bookings().create(body).await?;
    Ok(created(SubmissionResponse::from(booking)))
}

pub async fn admin_list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatusListQuery>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, AppError> {
    let page = state
        .bookings()
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
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    Ok(Json(ApiResponse::ok(state.bookings().get(id).await?)))
}

/// Approve, decline, cancel or complete a booking
pub async fn admin_update_status(
    State(state): State<AppState>,
    admin: AdminUser,
    PathId(id): PathId,
    ValidatedJson(body): ValidatedJson<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state.bookings().change_status(id, &body.status).await?;
    tracing::debug!(
        booking_id = id,
        admin = %admin.username,
        status = %body.status,
        "Booking reviewed"
    );
    Ok(Json(ApiResponse::ok(booking)))
}

pub async fn admin_delete(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    state.bookings().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
