//! Common Test Utilities
//!
//! In-memory repositories, a router-backed test application and request
//! helpers shared by the API tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use tower::ServiceExt;

use travel_desk::config::{
    AdminSettings, CorsSettings, DatabaseSettings, JwtSettings, RateLimitSettings,
    ServerSettings, Settings, SnowflakeSettings,
};
use travel_desk::domain::{
    Admin, AdminRepository, Booking, BookingRepository, BookingStatus, ContentPage,
    ContentPageRepository, CustomerQuery, CustomerQueryRepository, Flight, FlightRepository,
    FlightSearch, FlightSort, Package, PackageFilter, PackageRepository, PackageSort, Page,
    Pagination, Partner, PartnerRepository, Service, ServiceKind, ServiceRepository,
    SettingsMap, SiteSettingRepository, Visa, VisaApplication, VisaApplicationRepository,
    VisaApplicationStatus, VisaRepository,
};
use travel_desk::infrastructure::database::{DatabaseProbe, ProbeResult};
use travel_desk::infrastructure::repositories::Repositories;
use travel_desk::presentation::http::routes::build_router;
use travel_desk::shared::error::AppError;
use travel_desk::startup::AppState;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

// ============================================================================
// Settings
// ============================================================================

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "mysql://unused".into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: 1,
            run_migrations: false,
        },
        jwt: JwtSettings {
            secret: "integration-test-secret-0123456789-abcdef".into(),
            expiry_minutes: 60,
        },
        admin: AdminSettings {
            bootstrap_username: Some(ADMIN_USERNAME.into()),
            bootstrap_password: Some(ADMIN_PASSWORD.into()),
        },
        snowflake: SnowflakeSettings {
            machine_id: 7,
            epoch: travel_desk::shared::snowflake::DEFAULT_EPOCH,
        },
        rate_limit: RateLimitSettings {
            login_requests: 5,
            submission_requests: 10,
            window_seconds: 60,
        },
        cors: CorsSettings {
            allowed_origins: vec!["http://localhost:5173".into()],
        },
        environment: "test".into(),
    }
}

// ============================================================================
// In-memory repositories
// ============================================================================

type Table<T> = Mutex<BTreeMap<i64, T>>;

fn not_found(what: &str) -> AppError {
    AppError::NotFound(format!("{} not found", what))
}

#[derive(Default)]
pub struct InMemoryPackages(Table<Package>);

#[async_trait]
impl PackageRepository for InMemoryPackages {
    async fn list(
        &self,
        filter: &PackageFilter,
        sort: PackageSort,
        pagination: Pagination,
    ) -> Result<Page<Package>, AppError> {
        let mut items: Vec<Package> = self
            .0
            .lock()
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        items.sort_by(|a, b| sort.compare(a, b));
        Ok(pagination.apply(items))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Package>, AppError> {
        Ok(self.0.lock().get(&id).cloned())
    }

    async fn create(&self, package: &Package) -> Result<Package, AppError> {
        self.0.lock().insert(package.id, package.clone());
        Ok(package.clone())
    }

    async fn update(&self, package: &Package) -> Result<Package, AppError> {
        let mut rows = self.0.lock();
        let row = rows.get_mut(&package.id).ok_or_else(|| not_found("Package"))?;
        *row = package.clone();
        Ok(package.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.0.lock().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryServices(Table<Service>);

#[async_trait]
impl ServiceRepository for InMemoryServices {
    async fn list(
        &self,
        active_only: bool,
        kind: Option<ServiceKind>,
    ) -> Result<Vec<Service>, AppError> {
        let mut items: Vec<Service> = self
            .0
            .lock()
            .values()
            .filter(|s| !active_only || s.is_active)
            .filter(|s| kind.is_none_or(|k| k == s.kind))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Service>, AppError> {
        Ok(self.0.lock().get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Service>, AppError> {
        Ok(self.0.lock().values().find(|s| s.slug == slug).cloned())
    }

    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        self.0.lock().insert(service.id, service.clone());
        Ok(service.clone())
    }

    async fn update(&self, service: &Service) -> Result<Service, AppError> {
        let mut rows = self.0.lock();
        let row = rows.get_mut(&service.id).ok_or_else(|| not_found("Service"))?;
        *row = service.clone();
        Ok(service.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.0.lock().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryFlights(Table<Flight>);

#[async_trait]
impl FlightRepository for InMemoryFlights {
    async fn search(
        &self,
        criteria: &FlightSearch,
        sort: FlightSort,
    ) -> Result<Vec<Flight>, AppError> {
        let mut items: Vec<Flight> = self
            .0
            .lock()
            .values()
            .filter(|f| criteria.matches(f))
            .cloned()
            .collect();
        items.sort_by(|a, b| sort.compare(a, b));
        Ok(items)
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Flight>, AppError> {
        let mut items: Vec<Flight> = self.0.lock().values().cloned().collect();
        items.sort_by(|a, b| {
            b.departure_at
                .cmp(&a.departure_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(pagination.apply(items))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Flight>, AppError> {
        Ok(self.0.lock().get(&id).cloned())
    }

    async fn create(&self, flight: &Flight) -> Result<Flight, AppError> {
        self.0.lock().insert(flight.id, flight.clone());
        Ok(flight.clone())
    }

    async fn update(&self, flight: &Flight) -> Result<Flight, AppError> {
        let mut rows = self.0.lock();
        let row = rows.get_mut(&flight.id).ok_or_else(|| not_found("Flight"))?;
        *row = flight.clone();
        Ok(flight.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.0.lock().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryVisas(Table<Visa>);

#[async_trait]
impl VisaRepository for InMemoryVisas {
    async fn list(
        &self,
        active_only: bool,
        country: Option<String>,
    ) -> Result<Vec<Visa>, AppError> {
        let country = country.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        let mut items: Vec<Visa> = self
            .0
            .lock()
            .values()
            .filter(|v| !active_only || v.is_active)
            .filter(|v| {
                country
                    .as_deref()
                    .is_none_or(|c| v.country.eq_ignore_ascii_case(c))
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.country
                .cmp(&b.country)
                .then_with(|| a.visa_type.cmp(&b.visa_type))
        });
        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Visa>, AppError> {
        Ok(self.0.lock().get(&id).cloned())
    }

    async fn create(&self, visa: &Visa) -> Result<Visa, AppError> {
        self.0.lock().insert(visa.id, visa.clone());
        Ok(visa.clone())
    }

    async fn update(&self, visa: &Visa) -> Result<Visa, AppError> {
        let mut rows = self.0.lock();
        let row = rows.get_mut(&visa.id).ok_or_else(|| not_found("Visa"))?;
        *row = visa.clone();
        Ok(visa.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.0.lock().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryPages(Table<ContentPage>);

#[async_trait]
impl ContentPageRepository for InMemoryPages {
    async fn list(&self, published_only: bool) -> Result<Vec<ContentPage>, AppError> {
        let mut items: Vec<ContentPage> = self
            .0
            .lock()
            .values()
            .filter(|p| !published_only || p.is_published)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ContentPage>, AppError> {
        Ok(self.0.lock().get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ContentPage>, AppError> {
        Ok(self.0.lock().values().find(|p| p.slug == slug).cloned())
    }

    async fn create(&self, page: &ContentPage) -> Result<ContentPage, AppError> {
        self.0.lock().insert(page.id, page.clone());
        Ok(page.clone())
    }

    async fn update(&self, page: &ContentPage) -> Result<ContentPage, AppError> {
        let mut rows = self.0.lock();
        let row = rows.get_mut(&page.id).ok_or_else(|| not_found("Page"))?;
        *row = page.clone();
        Ok(page.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.0.lock().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryPartners(Table<Partner>);

#[async_trait]
impl PartnerRepository for InMemoryPartners {
    async fn list(&self, active_only: bool) -> Result<Vec<Partner>, AppError> {
        let mut items: Vec<Partner> = self
            .0
            .lock()
            .values()
            .filter(|p| !active_only || p.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Partner>, AppError> {
        Ok(self.0.lock().get(&id).cloned())
    }

    async fn create(&self, partner: &Partner) -> Result<Partner, AppError> {
        self.0.lock().insert(partner.id, partner.clone());
        Ok(partner.clone())
    }

    async fn update(&self, partner: &Partner) -> Result<Partner, AppError> {
        let mut rows = self.0.lock();
        let row = rows.get_mut(&partner.id).ok_or_else(|| not_found("Partner"))?;
        *row = partner.clone();
        Ok(partner.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.0.lock().remove(&id).is_some())
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[derive(Default)]
pub struct InMemoryBookings(Table<Booking>);

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn list(
        &self,
        status: Option<BookingStatus>,
        pagination: Pagination,
    ) -> Result<Page<Booking>, AppError> {
        let mut items: Vec<Booking> = self
            .0
            .lock()
            .values()
            .filter(|b| status.is_none_or(|s| s == b.status))
            .cloned()
            .collect();
        newest_first(&mut items, |b| (b.created_at, b.id));
        Ok(pagination.apply(items))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        Ok(self.0.lock().get(&id).cloned())
    }

    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        self.0.lock().insert(booking.id, booking.clone());
        Ok(booking.clone())
    }

    async fn update_status(
        &self,
        id: i64,
        from: BookingStatus,
        to: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let mut rows = self.0.lock();
        match rows.get_mut(&id) {
            Some(row) if row.status == from => {
                row.status = to;
                row.updated_at = updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.0.lock().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryVisaApplications(Table<VisaApplication>);

#[async_trait]
impl VisaApplicationRepository for InMemoryVisaApplications {
    async fn list(
        &self,
        status: Option<VisaApplicationStatus>,
        pagination: Pagination,
    ) -> Result<Page<VisaApplication>, AppError> {
        let mut items: Vec<VisaApplication> = self
            .0
            .lock()
            .values()
            .filter(|a| status.is_none_or(|s| s == a.status))
            .cloned()
            .collect();
        newest_first(&mut items, |a| (a.created_at, a.id));
        Ok(pagination.apply(items))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<VisaApplication>, AppError> {
        Ok(self.0.lock().get(&id).cloned())
    }

    async fn create(&self, application: &VisaApplication) -> Result<VisaApplication, AppError> {
        self.0.lock().insert(application.id, application.clone());
        Ok(application.clone())
    }

    async fn update_status(
        &self,
        id: i64,
        from: VisaApplicationStatus,
        to: VisaApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let mut rows = self.0.lock();
        match rows.get_mut(&id) {
            Some(row) if row.status == from => {
                row.status = to;
                row.updated_at = updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.0.lock().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryQueries(Table<CustomerQuery>);

#[async_trait]
impl CustomerQueryRepository for InMemoryQueries {
    async fn list(
        &self,
        resolved: Option<bool>,
        pagination: Pagination,
    ) -> Result<Page<CustomerQuery>, AppError> {
        let mut items: Vec<CustomerQuery> = self
            .0
            .lock()
            .values()
            .filter(|q| resolved.is_none_or(|r| r == q.is_resolved))
            .cloned()
            .collect();
        newest_first(&mut items, |q| (q.created_at, q.id));
        Ok(pagination.apply(items))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CustomerQuery>, AppError> {
        Ok(self.0.lock().get(&id).cloned())
    }

    async fn create(&self, query: &CustomerQuery) -> Result<CustomerQuery, AppError> {
        self.0.lock().insert(query.id, query.clone());
        Ok(query.clone())
    }

    async fn set_resolved(
        &self,
        id: i64,
        resolved: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let mut rows = self.0.lock();
        match rows.get_mut(&id) {
            Some(row) => {
                row.is_resolved = resolved;
                row.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.0.lock().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemorySettings(Mutex<SettingsMap>);

#[async_trait]
impl SiteSettingRepository for InMemorySettings {
    async fn all(&self) -> Result<SettingsMap, AppError> {
        Ok(self.0.lock().clone())
    }

    async fn upsert_many(&self, values: &SettingsMap) -> Result<(), AppError> {
        let mut map = self.0.lock();
        for (key, value) in values {
            map.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.0.lock().remove(key).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryAdmins(Table<Admin>);

#[async_trait]
impl AdminRepository for InMemoryAdmins {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AppError> {
        Ok(self
            .0
            .lock()
            .values()
            .find(|a| a.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.0.lock().len() as i64)
    }

    async fn create(&self, admin: &Admin) -> Result<Admin, AppError> {
        self.0.lock().insert(admin.id, admin.clone());
        Ok(admin.clone())
    }

    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> Result<(), AppError> {
        if let Some(admin) = self.0.lock().get_mut(&id) {
            admin.last_login_at = Some(at);
        }
        Ok(())
    }
}

/// Probe whose health the test controls.
pub struct InMemoryProbe {
    pub healthy: AtomicBool,
}

impl Default for InMemoryProbe {
    fn default() -> Self {
        Self {
            healthy: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl DatabaseProbe for InMemoryProbe {
    async fn ping(&self) -> Result<ProbeResult, String> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(ProbeResult { latency_ms: 1 })
        } else {
            Err("connection refused".into())
        }
    }
}

// ============================================================================
// Test application
// ============================================================================

/// Router wired to in-memory repositories
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub probe: Arc<InMemoryProbe>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_settings(test_settings()).await
    }

    pub async fn with_settings(settings: Settings) -> Self {
        let probe = Arc::new(InMemoryProbe::default());
        let repos = Repositories {
            packages: Arc::new(InMemoryPackages::default()),
            services: Arc::new(InMemoryServices::default()),
            flights: Arc::new(InMemoryFlights::default()),
            visas: Arc::new(InMemoryVisas::default()),
            pages: Arc::new(InMemoryPages::default()),
            partners: Arc::new(InMemoryPartners::default()),
            bookings: Arc::new(InMemoryBookings::default()),
            visa_applications: Arc::new(InMemoryVisaApplications::default()),
            queries: Arc::new(InMemoryQueries::default()),
            settings: Arc::new(InMemorySettings::default()),
            admins: Arc::new(InMemoryAdmins::default()),
            probe: probe.clone(),
        };

        let state = AppState::new(settings, repos);
        state
            .bootstrap_admin()
            .await
            .expect("bootstrap admin should be created");

        Self {
            router: build_router(state.clone()),
            state,
            probe,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.send(Self::builder("GET", uri, None).body(Body::empty()).unwrap())
            .await
    }

    /// Make an authenticated GET request
    pub async fn get_auth(&self, uri: &str, token: &str) -> Response {
        self.send(
            Self::builder("GET", uri, Some(token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a request with a JSON body
    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        body: &Value,
        token: Option<&str>,
    ) -> Response {
        self.send(
            Self::builder(method, uri, token)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.json("POST", uri, body, None).await
    }

    /// POST from a given client address
    pub async fn post_json_from(&self, uri: &str, body: &Value, client_ip: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .header("X-Forwarded-For", client_ip)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make an authenticated DELETE request
    pub async fn delete_auth(&self, uri: &str, token: &str) -> Response {
        self.send(
            Self::builder("DELETE", uri, Some(token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Log in as the bootstrap admin and return the bearer token
    pub async fn admin_token(&self) -> String {
        let response = self
            .post_json(
                "/api/admin/login",
                &serde_json::json!({
                    "username": ADMIN_USERNAME,
                    "password": ADMIN_PASSWORD,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        body["data"]["access_token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Create a record through an admin endpoint and return its id
    pub async fn create_as_admin(&self, uri: &str, body: &Value, token: &str) -> String {
        let response = self.json("POST", uri, body, Some(token)).await;
        assert_eq!(response.status(), StatusCode::CREATED, "creating {}", uri);
        let body = body_json(response).await;
        body["data"]["id"]
            .as_str()
            .expect("string id in create response")
            .to_string()
    }
}

/// Read a response body as JSON
pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn package_body(title: &str, destination: &str, price: f64, days: i32) -> Value {
    serde_json::json!({
        "title": title,
        "destination": destination,
        "category": "domestic",
        "description": format!("{} tour", destination),
        "price": price,
        "duration_days": days,
        "duration_nights": (days - 1).max(0),
    })
}

pub fn flight_body(
    origin: &str,
    destination: &str,
    departure_at: DateTime<Utc>,
    minutes: i64,
    price: f64,
) -> Value {
    serde_json::json!({
        "airline": "Biman Bangladesh",
        "flight_number": "BG147",
        "origin": origin,
        "destination": destination,
        "departure_at": departure_at,
        "arrival_at": departure_at + chrono::Duration::minutes(minutes),
        "cabin_class": "economy",
        "price": price,
        "seats_available": 20,
        "stops": 0,
    })
}
