//! Rate Limiting API Tests

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{body_json, test_settings, TestApp};

fn bad_login() -> Value {
    json!({ "username": "admin", "password": "guessing" })
}

fn contact() -> Value {
    json!({
        "name": "Rahim",
        "email": "rahim@example.com",
        "subject": "Hotel",
        "message": "Do you book hotels in Sylhet?",
    })
}

#[tokio::test]
async fn test_login_is_limited_per_client() {
    let app = TestApp::new().await;

    for _ in 0..5 {
        let response = app
            .post_json_from("/api/admin/login", &bad_login(), "203.0.113.7")
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let blocked = app
        .post_json_from("/api/admin/login", &bad_login(), "203.0.113.7")
        .await;
    assert_eq!(blocked.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = blocked.headers()[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after >= 1 && retry_after <= 60);
    assert_eq!(body_json(blocked).await["code"], 10006);

    let other_client = app
        .post_json_from("/api/admin/login", &bad_login(), "198.51.100.20")
        .await;
    assert_eq!(other_client.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_submissions_report_remaining_quota() {
    let mut settings = test_settings();
    settings.rate_limit.submission_requests = 2;
    let app = TestApp::with_settings(settings).await;

    let first = app
        .post_json_from("/api/queries", &contact(), "192.0.2.1")
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(first.headers()["x-ratelimit-limit"], "2");
    assert_eq!(first.headers()["x-ratelimit-remaining"], "1");

    let second = app
        .post_json_from("/api/queries", &contact(), "192.0.2.1")
        .await;
    assert_eq!(second.headers()["x-ratelimit-remaining"], "0");

    let third = app
        .post_json_from("/api/queries", &contact(), "192.0.2.1")
        .await;
    assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_submission_limit_is_shared_across_forms() {
    let mut settings = test_settings();
    settings.rate_limit.submission_requests = 1;
    let app = TestApp::with_settings(settings).await;

    let query = app
        .post_json_from("/api/queries", &contact(), "192.0.2.9")
        .await;
    let booking = app
        .post_json_from(
            "/api/bookings",
            &json!({
                "kind": "service",
                "customer_name": "Rahim",
                "email": "rahim@example.com",
                "phone": "01700000000",
            }),
            "192.0.2.9",
        )
        .await;

    assert_eq!(query.status(), StatusCode::CREATED);
    assert_eq!(booking.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_catalog_reads_are_not_limited() {
    let mut settings = test_settings();
    settings.rate_limit.submission_requests = 1;
    let app = TestApp::with_settings(settings).await;

    for _ in 0..5 {
        assert_eq!(app.get("/api/packages").await.status(), StatusCode::OK);
    }
}
