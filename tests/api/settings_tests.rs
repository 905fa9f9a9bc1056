//! Site Settings API Tests

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

async fn server_with_token() -> (TestServer, String) {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let server = TestServer::new(app.router.clone()).unwrap();
    (server, token)
}

#[tokio::test]
async fn test_update_then_read_settings() {
    let (server, token) = server_with_token().await;

    let response = server
        .put("/api/admin/settings")
        .authorization_bearer(&token)
        .json(&json!({
            "contact.phone": "+880 1700-000000",
            "social.facebook": "https://facebook.com/traveldesk",
            "private.smtp_password": "hunter2",
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"].as_object().unwrap().len(), 3);

    let public = server.get("/api/settings").await.json::<Value>();
    assert_eq!(public["data"]["contact.phone"], "+880 1700-000000");
    assert!(public["data"].get("private.smtp_password").is_none());

    let admin = server
        .get("/api/admin/settings")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(admin["data"]["private.smtp_password"], "hunter2");
}

#[tokio::test]
async fn test_settings_keep_json_values() {
    let (server, token) = server_with_token().await;

    server
        .put("/api/admin/settings")
        .authorization_bearer(&token)
        .json(&json!({ "home.banner": { "title": "Eid offers", "active": true } }))
        .await
        .assert_status_ok();

    let public = server.get("/api/settings").await.json::<Value>();
    assert_eq!(public["data"]["home.banner"]["active"], true);
}

#[tokio::test]
async fn test_invalid_keys_are_rejected() {
    let (server, token) = server_with_token().await;

    let response = server
        .put("/api/admin/settings")
        .authorization_bearer(&token)
        .json(&json!({ "bad key!": 1 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], 10007);
    assert_eq!(body["errors"][0]["field"], "bad key!");
}

#[tokio::test]
async fn test_empty_update_is_bad_request() {
    let (server, token) = server_with_token().await;

    server
        .put("/api/admin/settings")
        .authorization_bearer(&token)
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_object_body_is_bad_request() {
    let (server, token) = server_with_token().await;

    let response = server
        .put("/api/admin/settings")
        .authorization_bearer(&token)
        .json(&json!(["not", "a", "map"]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], 10002);
}

#[tokio::test]
async fn test_delete_setting() {
    let (server, token) = server_with_token().await;
    server
        .put("/api/admin/settings")
        .authorization_bearer(&token)
        .json(&json!({ "contact.email": "hello@example.com" }))
        .await
        .assert_status_ok();

    server
        .delete("/api/admin/settings/contact.email")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete("/api/admin/settings/contact.email")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_private_prefix_ignores_case() {
    let (server, token) = server_with_token().await;

    server
        .put("/api/admin/settings")
        .authorization_bearer(&token)
        .json(&json!({ "Private.smtp_password": "hunter2", "PRIVATE.api_key": "k" }))
        .await
        .assert_status_ok();

    let public = server.get("/api/settings").await.json::<Value>();
    assert_eq!(public["data"], json!({}));

    let admin = server
        .get("/api/admin/settings")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(admin["data"]["private.smtp_password"], "hunter2");
    assert_eq!(admin["data"]["private.api_key"], "k");
}
