//! Flight Search API Tests

use axum::http::StatusCode;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

use crate::common::{body_json, flight_body, TestApp};

fn travel_day() -> NaiveDate {
    (Utc::now() + Duration::days(30)).date_naive()
}

fn at(day: NaiveDate, hour: u32) -> DateTime<Utc> {
    day.and_hms_opt(hour, 0, 0).unwrap().and_utc()
}

/// DAC→CXB on the travel day: cheap late, pricey early, plus a fast one,
/// and one return flight two days later.
async fn seed_flights(app: &TestApp) -> String {
    let token = app.admin_token().await;
    let day = travel_day();
    let mut business = flight_body("DAC", "CXB", at(day, 12), 65, 9000.0);
    business["cabin_class"] = json!("business");
    for body in [
        flight_body("DAC", "CXB", at(day, 18), 70, 4500.0),
        flight_body("DAC", "CXB", at(day, 7), 55, 6200.0),
        business,
        flight_body("CXB", "DAC", at(day + Duration::days(2), 9), 60, 4800.0),
    ] {
        app.create_as_admin("/api/admin/flights", &body, &token).await;
    }
    token
}

fn prices(list: &Value) -> Vec<f64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|f| f["price"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_one_way_search_sorted_by_price() {
    let app = TestApp::new().await;
    seed_flights(&app).await;

    let response = app
        .get(&format!(
            "/api/flights/search?origin=dac&destination=CXB&departure_date={}",
            travel_day()
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(prices(&json["data"]["outbound"]), vec![4500.0, 6200.0, 9000.0]);
    assert!(json["data"].get("inbound").is_none());
    assert_eq!(json["data"]["outbound"][0]["duration_minutes"], 70);
}

#[test_case("departure", vec![6200.0, 9000.0, 4500.0] ; "earliest first")]
#[test_case("duration", vec![6200.0, 9000.0, 4500.0] ; "fastest first")]
#[test_case("nonsense", vec![4500.0, 6200.0, 9000.0] ; "unknown sort uses price")]
#[tokio::test]
async fn test_search_sort_orders(sort: &str, expected: Vec<f64>) {
    let app = TestApp::new().await;
    seed_flights(&app).await;

    let json = body_json(
        app.get(&format!(
            "/api/flights/search?origin=DAC&destination=CXB&departure_date={}&sort={}",
            travel_day(),
            sort
        ))
        .await,
    )
    .await;

    assert_eq!(prices(&json["data"]["outbound"]), expected);
}

#[tokio::test]
async fn test_round_trip_includes_inbound_leg() {
    let app = TestApp::new().await;
    seed_flights(&app).await;
    let day = travel_day();

    let json = body_json(
        app.get(&format!(
            "/api/flights/search?origin=DAC&destination=CXB&departure_date={}&return_date={}",
            day,
            day + Duration::days(2)
        ))
        .await,
    )
    .await;

    assert_eq!(json["data"]["outbound"].as_array().unwrap().len(), 3);
    assert_eq!(prices(&json["data"]["inbound"]), vec![4800.0]);
}

#[tokio::test]
async fn test_search_filters_cabin_price_and_seats() {
    let app = TestApp::new().await;
    seed_flights(&app).await;
    let day = travel_day();

    let business = body_json(
        app.get(&format!(
            "/api/flights/search?origin=DAC&destination=CXB&departure_date={}&cabin_class=business",
            day
        ))
        .await,
    )
    .await;
    let budget = body_json(
        app.get(&format!(
            "/api/flights/search?origin=DAC&destination=CXB&departure_date={}&max_price=6200",
            day
        ))
        .await,
    )
    .await;
    let crowd = body_json(
        app.get(&format!(
            "/api/flights/search?origin=DAC&destination=CXB&departure_date={}&passengers=21",
            day
        ))
        .await,
    )
    .await;

    assert_eq!(prices(&business["data"]["outbound"]), vec![9000.0]);
    assert_eq!(prices(&budget["data"]["outbound"]), vec![4500.0, 6200.0]);
    assert!(crowd["data"]["outbound"].as_array().unwrap().is_empty());
}

#[test_case("destination=CXB&departure_date=2030-01-01", "origin" ; "missing origin")]
#[test_case("origin=DAC&destination=CXB", "departure_date" ; "missing date")]
#[test_case("origin=DHAKA&destination=CXB&departure_date=2030-01-01", "origin" ; "not an iata code")]
#[test_case("origin=DAC&destination=dac&departure_date=2030-01-01", "destination" ; "same airport")]
#[test_case("origin=DAC&destination=CXB&departure_date=2030-01-05&return_date=2030-01-01", "return_date" ; "return before departure")]
#[test_case("origin=DAC&destination=CXB&departure_date=2030-01-01&cabin_class=steerage", "cabin_class" ; "unknown cabin")]
#[test_case("origin=DAC&destination=CXB&departure_date=2020-01-01", "departure_date" ; "date in the past")]
#[tokio::test]
async fn test_invalid_search_is_rejected(query: &str, field: &str) {
    let app = TestApp::new().await;

    let response = app.get(&format!("/api/flights/search?{}", query)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10007);
    assert_eq!(json["errors"][0]["field"], field);
}

#[tokio::test]
async fn test_admin_flight_crud() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let departure = at(travel_day(), 10);
    let id = app
        .create_as_admin(
            "/api/admin/flights",
            &flight_body("dac", "cgp", departure, 45, 3900.0),
            &token,
        )
        .await;
    let uri = format!("/api/admin/flights/{}", id);

    let fetched = body_json(app.get_auth(&uri, &token).await).await;
    assert_eq!(fetched["data"]["origin"], "DAC");
    assert_eq!(fetched["data"]["destination"], "CGP");

    let mut body = flight_body("DAC", "CGP", departure, 45, 3500.0);
    body["seats_available"] = json!(3);
    let updated = app.json("PUT", &uri, &body, Some(&token)).await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["data"]["seats_available"], 3);

    let listing = body_json(app.get_auth("/api/admin/flights", &token).await).await;
    assert_eq!(listing["meta"]["total"], 1);

    assert_eq!(
        app.delete_auth(&uri, &token).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.get_auth(&uri, &token).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_arrival_before_departure_is_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .json(
            "POST",
            "/api/admin/flights",
            &flight_body("DAC", "CXB", at(travel_day(), 10), -30, 4000.0),
            Some(&token),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"][0]["field"], "arrival_at");
}
