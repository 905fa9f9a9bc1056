//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    admin_catalog, auth, bookings, catalog, flights, health, queries, settings,
    visa_applications,
};
use crate::infrastructure::metrics;
use crate::presentation::middleware::{
    auth_middleware, cors, create_security_headers_layer, create_trace_layer,
    rate_limit_login, rate_limit_submissions, track_metrics,
};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Build the complete router with every layer applied.
pub fn build_router(state: AppState) -> Router {
    let is_development = state.settings.is_development();
    let cors = cors::create_cors_layer(&state.settings.cors);

    Router::new()
        .nest("/api", api_routes(state.clone()))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/metrics", get(metrics_handler))
        .fallback(route_not_found)
        .layer(middleware::from_fn(track_metrics))
        .layer(create_trace_layer())
        .layer(cors)
        .layer(create_security_headers_layer(is_development))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics::gather_metrics(),
    )
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}

/// `/api` routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(submission_routes(state.clone()))
        .nest("/admin", admin_routes(state))
}

/// Public catalog (read-only)
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/packages", get(catalog::list_packages))
        .route("/packages/{id}", get(catalog::get_package))
        .route("/services", get(catalog::list_services))
        .route("/services/{slug}", get(catalog::get_service))
        .route("/flights/search", get(flights::search))
        .route("/visas", get(catalog::list_visas))
        .route("/visas/{id}", get(catalog::get_visa))
        .route("/pages/{slug}", get(catalog::get_page))
        .route("/partners", get(catalog::list_partners))
        .route("/settings", get(catalog::public_settings))
}

/// Public forms (rate limited per client IP)
fn submission_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/bookings", post(bookings::create))
        .route("/visa-applications", post(visa_applications::submit))
        .route("/queries", post(queries::submit))
        .route_layer(middleware::from_fn_with_state(state, rate_limit_submissions))
}

/// `/api/admin` routes
fn admin_routes(state: AppState) -> Router<AppState> {
    let login = Router::new()
        .route("/login", post(auth::login))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit_login));

    login.merge(protected_admin_routes(state))
}

/// Admin back-office (bearer token required)
fn protected_admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::me))
        .route(
            "/packages",
            get(admin_catalog::list_packages).post(admin_catalog::create_package),
        )
        .route(
            "/packages/{id}",
            get(admin_catalog::get_package)
                .put(admin_catalog::update_package)
                .delete(admin_catalog::delete_package),
        )
        .route(
            "/services",
            get(admin_catalog::list_services).post(admin_catalog::create_service),
        )
        .route(
            "/services/{id}",
            get(admin_catalog::get_service)
                .put(admin_catalog::update_service)
                .delete(admin_catalog::delete_service),
        )
        .route(
            "/flights",
            get(flights::admin_list).post(flights::admin_create),
        )
        .route(
            "/flights/{id}",
            get(flights::admin_get)
                .put(flights::admin_update)
                .delete(flights::admin_delete),
        )
        .route(
            "/visas",
            get(admin_catalog::list_visas).post(admin_catalog::create_visa),
        )
        .route(
            "/visas/{id}",
            get(admin_catalog::get_visa)
                .put(admin_catalog::update_visa)
                .delete(admin_catalog::delete_visa),
        )
        .route(
            "/pages",
            get(admin_catalog::list_pages).post(admin_catalog::create_page),
        )
        .route(
            "/pages/{id}",
            get(admin_catalog::get_page)
                .put(admin_catalog::update_page)
                .delete(admin_catalog::delete_page),
        )
        .route(
            "/partners",
            get(admin_catalog::list_partners).post(admin_catalog::create_partner),
        )
        .route(
            "/partners/{id}",
            get(admin_catalog::get_partner)
                .put(admin_catalog::update_partner)
                .delete(admin_catalog::delete_partner),
        )
        .route("/bookings", get(bookings::admin_list))
        .route(
            "/bookings/{id}",
            get(bookings::admin_get).delete(bookings::admin_delete),
        )
        .route("/bookings/{id}/status", patch(bookings::admin_update_status))
        .route("/visa-applications", get(visa_applications::admin_list))
        .route(
            "/visa-applications/{id}",
            get(visa_applications::admin_get).delete(visa_applications::admin_delete),
        )
        .route(
            "/visa-applications/{id}/status",
            patch(visa_applications::admin_update_status),
        )
        .route("/queries", get(queries::admin_list))
        .route("/queries/{id}", delete(queries::admin_delete))
        .route("/queries/{id}/resolve", patch(queries::admin_resolve))
        .route(
            "/settings",
            get(settings::admin_all).put(settings::admin_update),
        )
        .route("/settings/{key}", delete(settings::admin_delete))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
