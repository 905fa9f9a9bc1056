//! Catalog API Tests
//!
//! Admin writes through `/api/admin/*`, public reads through `/api/*`.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

use crate::common::{body_json, package_body, TestApp};

async fn seed_packages(app: &TestApp, token: &str) -> Vec<String> {
    let mut ids = Vec::new();
    for body in [
        package_body("Sundarbans Safari", "Khulna", 18000.0, 3),
        package_body("Sea Beach Escape", "Cox's Bazar", 12000.0, 4),
        package_body("Tea Garden Retreat", "Sylhet", 9500.0, 2),
    ] {
        ids.push(app.create_as_admin("/api/admin/packages", &body, token).await);
    }
    ids
}

fn titles(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_public_package_list_is_paged() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    seed_packages(&app, &token).await;

    let response = app.get("/api/packages?per_page=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["meta"]["total"], 3);
    assert_eq!(json["meta"]["page"], 1);
    assert_eq!(json["meta"]["per_page"], 2);
    assert_eq!(json["meta"]["total_pages"], 2);
}

#[test_case("sort=price_asc", &["Tea Garden Retreat", "Sea Beach Escape", "Sundarbans Safari"] ; "price ascending")]
#[test_case("sort=duration_desc", &["Sea Beach Escape", "Sundarbans Safari", "Tea Garden Retreat"] ; "longest first")]
#[test_case("sort=title", &["Sea Beach Escape", "Sundarbans Safari", "Tea Garden Retreat"] ; "by title")]
#[test_case("max_price=12000&sort=title", &["Sea Beach Escape", "Tea Garden Retreat"] ; "price ceiling")]
#[test_case("destination=cox&sort=title", &["Sea Beach Escape"] ; "destination substring")]
#[test_case("q=garden", &["Tea Garden Retreat"] ; "free text")]
#[test_case("max_duration=3&sort=price_desc", &["Sundarbans Safari", "Tea Garden Retreat"] ; "short trips")]
#[tokio::test]
async fn test_package_filters_and_sorting(query: &str, expected: &[&str]) {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    seed_packages(&app, &token).await;

    let response = app.get(&format!("/api/packages?{}", query)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(titles(&body_json(response).await), expected);
}

#[tokio::test]
async fn test_unknown_sort_falls_back_to_newest() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    seed_packages(&app, &token).await;

    let response = app.get("/api/packages?sort=bogus").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_invalid_price_filter_is_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/api/packages?min_price=cheap").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10007);
    assert_eq!(json["errors"][0]["field"], "min_price");
}

#[tokio::test]
async fn test_discount_drives_effective_price() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let mut body = package_body("Saint Martin Island", "Saint Martin", 15000.0, 3);
    body["discount_price"] = json!(11000.0);
    let id = app.create_as_admin("/api/admin/packages", &body, &token).await;

    let response = app.get(&format!("/api/packages/{}", id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_discounted"], true);
    assert_eq!(json["data"]["effective_price"], 11000.0);
    assert_eq!(json["data"]["price"], 15000.0);
}

#[tokio::test]
async fn test_package_is_localized_with_lang() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let mut body = package_body("Sylhet Tea Tour", "Sylhet", 8000.0, 2);
    body["title_bn"] = json!("সিলেট চা ভ্রমণ");
    let id = app.create_as_admin("/api/admin/packages", &body, &token).await;

    let bn = body_json(app.get(&format!("/api/packages/{}?lang=bn", id)).await).await;
    let en = body_json(app.get(&format!("/api/packages/{}", id)).await).await;

    assert_eq!(bn["data"]["title"], "সিলেট চা ভ্রমণ");
    assert_eq!(bn["data"]["lang"], "bn");
    assert_eq!(en["data"]["title"], "Sylhet Tea Tour");
    // Falls back to English when no translation exists
    assert_eq!(bn["data"]["description"], "Sylhet tour");
}

#[tokio::test]
async fn test_inactive_package_is_hidden_from_public() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let mut body = package_body("Retired Tour", "Bandarban", 7000.0, 2);
    body["is_active"] = json!(false);
    let id = app.create_as_admin("/api/admin/packages", &body, &token).await;

    let public = app.get(&format!("/api/packages/{}", id)).await;
    let admin = app
        .get_auth(&format!("/api/admin/packages/{}", id), &token)
        .await;
    let listing = body_json(app.get("/api/packages").await).await;

    assert_eq!(public.status(), StatusCode::NOT_FOUND);
    assert_eq!(admin.status(), StatusCode::OK);
    assert_eq!(listing["meta"]["total"], 0);
}

#[tokio::test]
async fn test_package_update_and_delete() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let id = app
        .create_as_admin(
            "/api/admin/packages",
            &package_body("Old Title", "Rangamati", 6000.0, 2),
            &token,
        )
        .await;
    let uri = format!("/api/admin/packages/{}", id);

    let updated = app
        .json(
            "PUT",
            &uri,
            &package_body("New Title", "Rangamati", 6500.0, 2),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["data"]["title"], "New Title");

    assert_eq!(
        app.delete_auth(&uri, &token).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.delete_auth(&uri, &token).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_package_validation_errors() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let mut body = package_body("", "Khulna", 100.0, 2);
    body["duration_days"] = json!(0);

    let response = app
        .json("POST", "/api/admin/packages", &body, Some(&token))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["duration_days", "title"]);
}

#[test_case("/api/packages/abc" ; "letters")]
#[test_case("/api/packages/-5" ; "negative")]
#[test_case("/api/visas/0" ; "zero")]
#[tokio::test]
async fn test_malformed_ids_are_rejected(uri: &str) {
    let app = TestApp::new().await;

    let response = app.get(uri).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"][0]["field"], "id");
}

#[tokio::test]
async fn test_services_by_kind_and_slug() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.create_as_admin(
        "/api/admin/services",
        &json!({ "kind": "car_rental", "title": "Car Rental", "sort_order": 2 }),
        &token,
    )
    .await;
    app.create_as_admin(
        "/api/admin/services",
        &json!({ "kind": "insurance", "title": "Travel Insurance", "sort_order": 1 }),
        &token,
    )
    .await;

    let all = body_json(app.get("/api/services").await).await;
    let cars = body_json(app.get("/api/services?kind=car-rental").await).await;
    let by_slug = app.get("/api/services/car-rental").await;

    assert_eq!(titles(&all), vec!["Travel Insurance", "Car Rental"]);
    assert_eq!(titles(&cars), vec!["Car Rental"]);
    assert_eq!(by_slug.status(), StatusCode::OK);
    assert_eq!(body_json(by_slug).await["data"]["kind"], "car_rental");
}

#[tokio::test]
async fn test_unknown_service_kind_is_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/api/services?kind=spaceflight").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"][0]["field"], "kind");
}

#[tokio::test]
async fn test_duplicate_service_slug_conflicts() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let body = json!({ "kind": "hotel", "title": "Hotel Booking" });
    app.create_as_admin("/api/admin/services", &body, &token)
        .await;

    let response = app
        .json("POST", "/api/admin/services", &body, Some(&token))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], 10005);
}

#[tokio::test]
async fn test_visas_filtered_by_country() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    for (country, visa_type) in [("Thailand", "tourist"), ("Malaysia", "tourist"), ("Thailand", "business")] {
        app.create_as_admin(
            "/api/admin/visas",
            &json!({
                "country": country,
                "visa_type": visa_type,
                "processing_days": 7,
                "validity_days": 90,
                "fee": 4500.0,
                "requirements": ["Passport", "Photo"],
            }),
            &token,
        )
        .await;
    }

    let json = body_json(app.get("/api/visas?country=thailand").await).await;

    let types: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["visa_type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["business", "tourist"]);
}

#[tokio::test]
async fn test_unpublished_page_is_not_public() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.create_as_admin(
        "/api/admin/pages",
        &json!({ "title": "About Us", "content": "We plan trips.", "is_published": true }),
        &token,
    )
    .await;
    app.create_as_admin(
        "/api/admin/pages",
        &json!({ "title": "Draft Terms", "content": "Coming soon" }),
        &token,
    )
    .await;

    let about = app.get("/api/pages/about-us").await;
    let draft = app.get("/api/pages/draft-terms").await;

    assert_eq!(about.status(), StatusCode::OK);
    assert_eq!(body_json(about).await["data"]["content"], "We plan trips.");
    assert_eq!(draft.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partners_only_active_in_order() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    for (name, order, active) in [("US-Bangla", 2, true), ("Emirates", 1, true), ("Gone Air", 0, false)] {
        app.create_as_admin(
            "/api/admin/partners",
            &json!({
                "name": name,
                "logo_url": "https://cdn.example.com/logo.png",
                "sort_order": order,
                "is_active": active,
            }),
            &token,
        )
        .await;
    }

    let public = body_json(app.get("/api/partners").await).await;
    let admin = body_json(app.get_auth("/api/admin/partners", &token).await).await;

    let names: Vec<&str> = public["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Emirates", "US-Bangla"]);
    assert_eq!(admin["data"].as_array().unwrap().len(), 3);
}

#[test_case("/api/packages?page=abc" ; "non numeric page")]
#[test_case("/api/packages?featured=yes" ; "non boolean flag")]
#[test_case("/api/flights/search?origin=DAC&destination=CXB&departure_date=tomorrow" ; "unparseable date")]
#[tokio::test]
async fn test_malformed_query_string_uses_error_envelope(uri: &str) {
    let app = TestApp::new().await;

    let response = app.get(uri).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], 10002);
    assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
}
