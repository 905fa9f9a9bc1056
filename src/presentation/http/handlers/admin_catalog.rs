//! Admin Catalog Handlers
//!
//! Back-office CRUD over packages, services, visas, pages and partners.
//! Records are returned as stored, inactive ones included.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{
    PackageListQuery, PackageRequest, PageRequest, PartnerRequest, ServiceListQuery,
    ServiceRequest, VisaListQuery, VisaRequest,
};
use crate::application::dto::response::ApiResponse;
use crate::domain::{ContentPage, Package, Pagination, Partner, Service, Visa};
use crate::presentation::http::extractors::{ApiQuery, PathId, ValidatedJson};
use crate::presentation::http::handlers::catalog::{package_filter, package_sort, parse_kind};
use crate::presentation::http::handlers::{created, Created};
use crate::shared::error::AppError;
use crate::startup::AppState;

// ============================================================================
// Packages
// ============================================================================

pub async fn list_packages(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PackageListQuery>,
) -> Result<Json<ApiResponse<Vec<Package>>>, AppError> {
    let filter = package_filter(&query, false)?;
    let page = state
        .catalog()
        .list_packages(
            &filter,
            package_sort(query.sort.as_deref()),
            Pagination::new(query.page, query.per_page),
        )
        .await?;
    Ok(Json(ApiResponse::paged(page)))
}

pub async fn get_package(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<Package>>, AppError> {
    Ok(Json(ApiResponse::ok(state.catalog().get_package(id, false).await?)))
}

pub async fn create_package(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<PackageRequest>,
) -> Result<Created<Package>, AppError> {
    Ok(created(state.catalog().create_package(body).await?))
}

pub async fn update_package(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(body): ValidatedJson<PackageRequest>,
) -> Result<Json<ApiResponse<Package>>, AppError> {
    Ok(Json(ApiResponse::ok(
        state.catalog().update_package(id, body).await?,
    )))
}

pub async fn delete_package(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    state.catalog().delete_package(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Services
// ============================================================================

pub async fn list_services(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ServiceListQuery>,
) -> Result<Json<ApiResponse<Vec<Service>>>, AppError> {
    let kind = parse_kind(query.kind.as_deref())?;
    Ok(Json(ApiResponse::ok(
        state.catalog().list_services(false, kind).await?,
    )))
}

pub async fn get_service(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<Service>>, AppError> {
    Ok(Json(ApiResponse::ok(state.catalog().get_service(id).await?)))
}

pub async fn create_service(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ServiceRequest>,
) -> Result<Created<Service>, AppError> {
    Ok(created(state.catalog().create_service(body).await?))
}

pub async fn update_service(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(body): ValidatedJson<ServiceRequest>,
) -> Result<Json<ApiResponse<Service>>, AppError> {
    Ok(Json(ApiResponse::ok(
        state.catalog().update_service(id, body).await?,
    )))
}

pub async fn delete_service(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    state.catalog().delete_service(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Visas
// ============================================================================

pub async fn list_visas(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<VisaListQuery>,
) -> Result<Json<ApiResponse<Vec<Visa>>>, AppError> {
    Ok(Json(ApiResponse::ok(
        state.catalog().list_visas(false, query.country).await?,
    )))
}

pub async fn get_visa(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<Visa>>, AppError> {
    Ok(Json(ApiResponse::ok(state.catalog().get_visa(id, false).await?)))
}

pub async fn create_visa(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<VisaRequest>,
) -> Result<Created<Visa>, AppError> {
    Ok(created(state.catalog().create_visa(body).await?))
}

pub async fn update_visa(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(body): ValidatedJson<VisaRequest>,
) -> Result<Json<ApiResponse<Visa>>, AppError> {
    Ok(Json(ApiResponse::ok(
        state.catalog().update_visa(id, body).await?,
    )))
}

pub async fn delete_visa(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    state.catalog().delete_visa(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Pages
// ============================================================================

pub async fn list_pages(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ContentPage>>>, AppError> {
    Ok(Json(ApiResponse::ok(state.catalog().list_pages(false).await?)))
}

pub async fn get_page(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<ContentPage>>, AppError> {
    Ok(Json(ApiResponse::ok(state.catalog().get_page(id).await?)))
}

pub async fn create_page(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<PageRequest>,
) -> Result<Created<ContentPage>, AppError> {
    Ok(created(state.catalog().create_page(body).await?))
}

pub async fn update_page(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(body): ValidatedJson<PageRequest>,
) -> Result<Json<ApiResponse<ContentPage>>, AppError> {
    Ok(Json(ApiResponse::ok(
        state.catalog().update_page(id, body).await?,
    )))
}

pub async fn delete_page(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    state.catalog().delete_page(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Partners
// ============================================================================

pub async fn list_partners(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Partner>>>, AppError> {
    Ok(Json(ApiResponse::ok(state.catalog().list_partners(false).await?)))
}

pub async fn get_partner(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<Partner>>, AppError> {
    Ok(Json(ApiResponse::ok(state.catalog().get_partner(id).await?)))
}

pub async fn create_partner(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<PartnerRequest>,
) -> Result<Created<Partner>, AppError> {
    Ok(created(state.catalog().create_partner(body).await?))
}

pub async fn update_partner(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(body): ValidatedJson<PartnerRequest>,
) -> Result<Json<ApiResponse<Partner>>, AppError> {
    Ok(Json(ApiResponse::ok(
        state.catalog().update_partner(id, body).await?,
    )))
}

pub async fn delete_partner(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    state.catalog().delete_partner(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
