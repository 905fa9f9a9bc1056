//! Admin Authentication API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use crate::common::{body_json, TestApp, ADMIN_PASSWORD, ADMIN_USERNAME};

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/api/admin/login",
            &json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["token_type"], "Bearer");
    assert_eq!(json["data"]["username"], ADMIN_USERNAME);
    assert_eq!(json["data"]["expires_in"], 3600);
    assert!(!json["data"]["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/api/admin/login",
            &json!({ "username": ADMIN_USERNAME, "password": "not-the-password" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10003);
    assert_eq!(json["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_with_unknown_user_fails_the_same_way() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/api/admin/login",
            &json!({ "username": "nobody", "password": ADMIN_PASSWORD }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Invalid username or password"
    );
}

#[tokio::test]
async fn test_login_with_blank_username_is_a_validation_error() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/api/admin/login",
            &json!({ "username": "", "password": ADMIN_PASSWORD }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10007);
    assert_eq!(json["errors"][0]["field"], "username");
}

#[tokio::test]
async fn test_login_with_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/api/admin/login", &json!({ "username": 42 }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], 10002);
}

#[tokio::test]
async fn test_me_returns_current_admin() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app.get_auth("/api/admin/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], ADMIN_USERNAME);
    assert_eq!(json["data"]["role"], "admin");
    assert!(json["data"]["id"].is_string());
}

#[test_case("/api/admin/me" ; "profile")]
#[test_case("/api/admin/packages" ; "packages")]
#[test_case("/api/admin/bookings" ; "bookings")]
#[test_case("/api/admin/settings" ; "settings")]
#[tokio::test]
async fn test_admin_routes_require_token(uri: &str) {
    let app = TestApp::new().await;

    let response = app.get(uri).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Missing authorization header"
    );
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new().await;

    let response = app.get_auth("/api/admin/me", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], 10003);
}

#[tokio::test]
async fn test_token_from_another_secret_is_rejected() {
    let app = TestApp::new().await;
    let mut settings = crate::common::test_settings();
    settings.jwt.secret = "a-completely-different-secret-0123456789".into();
    let other = TestApp::with_settings(settings).await;
    let foreign_token = other.admin_token().await;

    let response = app.get_auth("/api/admin/me", &foreign_token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use travel_desk::application::services::AdminClaims;

    let app = TestApp::new().await;
    let issued = Utc::now() - Duration::hours(3);
    let claims = AdminClaims {
        sub: "7".to_string(),
        username: ADMIN_USERNAME.to_string(),
        role: "admin".to_string(),
        iat: issued.timestamp(),
        exp: (issued + Duration::hours(1)).timestamp(),
        jti: "expired-session".to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(app.state.settings.jwt.secret.as_bytes()),
    )
    .unwrap();

    let response = app.get_auth("/api/admin/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10003);
    assert_eq!(json["message"], "Token expired");
}
