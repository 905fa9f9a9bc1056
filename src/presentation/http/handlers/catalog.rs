//! Public Catalog Handlers
//!
//! Read-only endpoints behind the marketing site. Text fields are rendered
//! in the language picked by `?lang=` and inactive records stay hidden.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::request::{
    LangQuery, PackageListQuery, ServiceListQuery, VisaListQuery,
};
use crate::application::dto::response::{
    ApiResponse, PackageView, PageView, PartnerView, ServiceView, VisaView,
};
use crate::domain::{PackageFilter, PackageSort, Pagination, ServiceKind, SettingsMap};
use crate::presentation::http::extractors::{locale, ApiQuery, PathId};
use crate::shared::error::AppError;
use crate::shared::validation::optional_amount;
use crate::startup::AppState;

/// Build a package filter from query parameters.
pub(crate) fn package_filter(
    query: &PackageListQuery,
    active_only: bool,
) -> Result<PackageFilter, AppError> {
    Ok(PackageFilter {
        destination: query.destination.clone(),
        category: query.category.clone(),
        min_price: optional_amount("min_price", query.min_price.as_deref())?,
        max_price: optional_amount("max_price", query.max_price.as_deref())?,
        max_duration_days: query.max_duration,
        featured_only: query.featured.unwrap_or(false),
        active_only,
        search: query.q.clone(),
    })
}

/// Unknown sort keys fall back to newest first.
pub(crate) fn package_sort(raw: Option<&str>) -> PackageSort {
    raw.and_then(PackageSort::parse).unwrap_or_default()
}

/// List active packages
pub async fn list_packages(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PackageListQuery>,
) -> Result<Json<ApiResponse<Vec<PackageView>>>, AppError> {
    let lang = locale(query.lang.as_deref());
    let filter = package_filter(&query, true)?;
    let pagination = Pagination::new(query.page, query.per_page);

    let page = state
        .catalog()
        .list_packages(&filter, package_sort(query.sort.as_deref()), pagination)
        .await?;

    Ok(Json(ApiResponse::paged(
        page.map(|p| PackageView::localized(p, lang)),
    )))
}

/// Package detail
pub async fn get_package(
    State(state): State<AppState>,
    PathId(id): PathId,
    ApiQuery(query): ApiQuery<LangQuery>,
) -> Result<Json<ApiResponse<PackageView>>, AppError> {
    let package = state.catalog().get_package(id, true).await?;
    Ok(Json(ApiResponse::ok(PackageView::localized(
        package,
        locale(query.lang.as_deref()),
    ))))
}

/// List active services, optionally of one kind
pub async fn list_services(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ServiceListQuery>,
) -> Result<Json<ApiResponse<Vec<ServiceView>>>, AppError> {
    let lang = locale(query.lang.as_deref());
    let kind = parse_kind(query.kind.as_deref())?;

    let services = state.catalog().list_services(true, kind).await?;
    Ok(Json(ApiResponse::ok(
        services
            .into_iter()
            .map(|s| ServiceView::localized(s, lang))
            .collect(),
    )))
}

/// Service landing page by slug
pub async fn get_service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiQuery(query): ApiQuery<LangQuery>,
) -> Result<Json<ApiResponse<ServiceView>>, AppError> {
    let service = state.catalog().get_service_by_slug(&slug, true).await?;
    Ok(Json(ApiResponse::ok(ServiceView::localized(
        service,
        locale(query.lang.as_deref()),
    ))))
}

/// List active visas, optionally for one country
pub async fn list_visas(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<VisaListQuery>,
) -> Result<Json<ApiResponse<Vec<VisaView>>>, AppError> {
    let lang = locale(query.lang.as_deref());
    let visas = state.catalog().list_visas(true, query.country).await?;
    Ok(Json(ApiResponse::ok(
        visas
            .into_iter()
            .map(|v| VisaView::localized(v, lang))
            .collect(),
    )))
}

/// Visa detail
pub async fn get_visa(
    State(state): State<AppState>,
    PathId(id): PathId,
    ApiQuery(query): ApiQuery<LangQuery>,
) -> Result<Json<ApiResponse<VisaView>>, AppError> {
    let visa = state.catalog().get_visa(id, true).await?;
    Ok(Json(ApiResponse::ok(VisaView::localized(
        visa,
        locale(query.lang.as_deref()),
    ))))
}

/// Published static page
pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiQuery(query): ApiQuery<LangQuery>,
) -> Result<Json<ApiResponse<PageView>>, AppError> {
    let page = state.catalog().get_page_by_slug(&slug, true).await?;
    Ok(Json(ApiResponse::ok(PageView::localized(
        page,
        locale(query.lang.as_deref()),
    ))))
}

/// Active partner logos
pub async fn list_partners(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PartnerView>>>, AppError> {
    let partners = state.catalog().list_partners(true).await?;
    Ok(Json(ApiResponse::ok(
        partners.into_iter().map(PartnerView::from).collect(),
    )))
}

/// Settings the public site may read
pub async fn public_settings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SettingsMap>>, AppError> {
    let settings = state.site_settings().public_settings().await?;
    Ok(Json(ApiResponse::ok(settings)))
}

pub(crate) fn parse_kind(raw: Option<&str>) -> Result<Option<ServiceKind>, AppError> {
    match raw.map(str::trim).filter(|k| !k.is_empty()) {
        None => Ok(None),
        Some(k) => ServiceKind::parse(k)
            .map(Some)
            .ok_or_else(|| AppError::invalid_field("kind", "Unknown service kind")),
    }
}
