//! Health Check API Tests

use std::sync::atomic::Ordering;

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;

use crate::common::{body_json, TestApp};

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new().await;

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reports_database() {
    let app = TestApp::new().await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"]["status"], "healthy");
    assert_eq!(json["database"]["latency_ms"], 1);
}

#[tokio::test]
async fn test_readiness_fails_when_database_is_down() {
    let app = TestApp::new().await;
    app.probe.healthy.store(false, Ordering::SeqCst);

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "unhealthy");
    assert!(json["database"]["message"].is_string());
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_prometheus_text() {
    let app = TestApp::new().await;
    app.get("/health").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    let headers = response.headers();
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert!(headers.contains_key(header::STRICT_TRANSPORT_SECURITY));
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = TestApp::new().await;

    let response = app.get("/api/nowhere").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], 10001);
}
