//! Flight Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{FlightRequest, FlightSearchQuery, PaginationQuery};
use crate::application::dto::response::{ApiResponse, FlightSearchResponse};
use crate::domain::{CabinClass, Flight, FlightSearch, FlightSort, Pagination};
use crate::presentation::http::extractors::{ApiQuery, PathId, ValidatedJson};
use crate::presentation::http::handlers::{created, Created};
use crate::shared::error::AppError;
use crate::shared::validation::optional_amount;
use crate::startup::AppState;

/// Public flight search
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FlightSearchQuery>,
) -> Result<Json<ApiResponse<FlightSearchResponse>>, AppError> {
    let origin = required("origin", query.origin)?;
    let destination = required("destination", query.destination)?;
    let departure_date = query
        .departure_date
        .ok_or_else(|| AppError::invalid_field("departure_date", "Required"))?;
    let cabin_class = match query.cabin_class.as_deref().map(str::trim) {
        None | Some("") | Some("any") => None,
        Some(raw) => Some(
            CabinClass::parse(raw)
                .ok_or_else(|| AppError::invalid_field("cabin_class", "Unknown cabin class"))?,
        ),
    };

    let criteria = FlightSearch {
        origin,
        destination,
        departure_date,
        cabin_class,
        passengers: query.passengers.unwrap_or(1),
        max_price: optional_amount("max_price", query.max_price.as_deref())?,
        max_stops: query.max_stops,
    };
    let sort = query
        .sort
        .as_deref()
        .and_then(FlightSort::parse)
        .unwrap_or_default();

    let result = state
        .flights()
        .search(criteria, query.return_date, sort)
        .await?;
    Ok(Json(ApiResponse::ok(FlightSearchResponse::from(result))))
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::invalid_field(field, "Required"))
}

// ============================================================================
// Admin
// ============================================================================

/// All flights, newest departure first
pub async fn admin_list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<Flight>>>, AppError> {
    let page = state
        .flights()
        .list(Pagination::new(query.page, query.per_page))
        .await?;
    Ok(Json(ApiResponse::paged(page)))
}

pub async fn admin_get(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<Flight>>, AppError> {
    let flight = state.flights().get(id).await?;
    Ok(Json(ApiResponse::ok(flight)))
}

pub async fn admin_create(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<FlightRequest>,
) -> Result<Created<Flight>, AppError> {
    let flight = state.flights().create(body).await?;
    Ok(created(flight))
}

pub async fn admin_update(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(body): ValidatedJson<FlightRequest>,
) -> Result<Json<ApiResponse<Flight>>, AppError> {
    let flight = state.flights().update(id, body).await?;
    Ok(Json(ApiResponse::ok(flight)))
}

pub async fn admin_delete(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    state.flights().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
