//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Admin authentication
// ============================================================================

/// Admin login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Catalog (admin writes)
// ============================================================================

fn default_true() -> bool {
    true
}

fn default_one() -> i32 {
    1
}

/// Create or replace a holiday package
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PackageRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 200))]
    pub title_bn: Option<String>,

    #[validate(length(min = 1, max = 120, message = "Destination must be 1-120 characters"))]
    pub destination: String,

    #[validate(length(min = 1, max = 60))]
    pub category: Option<String>,

    #[serde(default)]
    pub description: String,

    pub description_bn: Option<String>,

    pub price: Decimal,

    pub discount_price: Option<Decimal>,

    #[serde(default = "default_one")]
    #[validate(range(min = 1, max = 365, message = "Duration must be 1-365 days"))]
    pub duration_days: i32,

    #[serde(default)]
    #[validate(range(min = 0, max = 365))]
    pub duration_nights: i32,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub highlights: Vec<String>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Create or replace a service page
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceRequest {
    /// Derived from the title when omitted
    #[validate(length(max = 120))]
    pub slug: Option<String>,

    pub kind: String,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 200))]
    pub title_bn: Option<String>,

    #[serde(default)]
    pub description: String,

    pub description_bn: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    pub price_from: Option<Decimal>,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Create or replace a flight
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FlightRequest {
    #[validate(length(min = 1, max = 100, message = "Airline is required"))]
    pub airline: String,

    #[validate(length(min = 2, max = 20, message = "Flight number must be 2-20 characters"))]
    pub flight_number: String,

    pub origin: String,

    pub destination: String,

    pub departure_at: DateTime<Utc>,

    pub arrival_at: DateTime<Utc>,

    pub cabin_class: Option<String>,

    pub price: Decimal,

    #[validate(range(min = 0, max = 1000))]
    pub seats_available: i32,

    #[serde(default)]
    #[validate(range(min = 0, max = 5))]
    pub stops: i32,
}

/// Create or replace a visa offering
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VisaRequest {
    #[validate(length(min = 1, max = 100, message = "Country is required"))]
    pub country: String,

    #[validate(length(min = 1, max = 50, message = "Visa type is required"))]
    pub visa_type: String,

    #[validate(range(min = 0, max = 365))]
    pub processing_days: i32,

    #[validate(range(min = 0, max = 3650))]
    pub validity_days: i32,

    pub fee: Decimal,

    #[serde(default)]
    pub requirements: Vec<String>,

    #[serde(default)]
    pub description: String,

    pub description_bn: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Create or replace a static page
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PageRequest {
    #[validate(length(max = 120))]
    pub slug: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 200))]
    pub title_bn: Option<String>,

    #[serde(default)]
    pub content: String,

    pub content_bn: Option<String>,

    #[serde(default)]
    pub is_published: bool,
}

/// Create or replace a partner logo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PartnerRequest {
    #[validate(length(min = 1, max = 150, message = "Name is required"))]
    pub name: String,

    #[validate(url(message = "Invalid logo URL"))]
    pub logo_url: String,

    #[validate(url(message = "Invalid website URL"))]
    pub website_url: Option<String>,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

// ============================================================================
// Public submissions
// ============================================================================

/// Booking request from the public site
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingRequest {
    /// `flight`, `package` or `service`
    pub kind: String,

    /// Package, flight or service id (string form of the snowflake)
    pub reference_id: Option<String>,

    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters"))]
    pub customer_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 30, message = "Phone must be 6-30 characters"))]
    pub phone: String,

    #[serde(default = "default_one")]
    #[validate(range(min = 1, max = 50, message = "Travellers must be 1-50"))]
    pub travellers: i32,

    pub travel_date: Option<NaiveDate>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    /// Free-form extras captured by the booking form
    pub details: Option<serde_json::Value>,
}

/// Visa application from the public site
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VisaApplicationRequest {
    pub visa_id: String,

    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters"))]
    pub applicant_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 30, message = "Phone must be 6-30 characters"))]
    pub phone: String,

    #[validate(length(min = 5, max = 30, message = "Passport number must be 5-30 characters"))]
    pub passport_number: String,

    #[validate(length(min = 2, max = 80, message = "Nationality is required"))]
    pub nationality: String,

    pub travel_date: Option<NaiveDate>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Contact form submission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QueryRequest {
    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 30, message = "Phone must be 6-30 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}

// ============================================================================
// Moderation
// ============================================================================

/// Status change for bookings and visa applications
#[derive(Debug, Deserialize, Validate)]
pub struct StatusUpdateRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Resolve or reopen a customer query
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveRequest {
    #[serde(default = "default_true")]
    pub resolved: bool,
}

// ============================================================================
// Query strings
// ============================================================================

/// `?lang=` on public detail endpoints
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

/// `?page=&per_page=`
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Package listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PackageListQuery {
    pub lang: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub destination: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub max_duration: Option<i32>,
    pub featured: Option<bool>,
    #[serde(alias = "search")]
    pub q: Option<String>,
    pub sort: Option<String>,
}

/// Service listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ServiceListQuery {
    pub lang: Option<String>,
    pub kind: Option<String>,
}

/// Visa listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct VisaListQuery {
    pub lang: Option<String>,
    pub country: Option<String>,
}

/// Flight search query parameters
#[derive(Debug, Default, Deserialize)]
pub struct FlightSearchQuery {
    #[serde(alias = "from")]
    pub origin: Option<String>,
    #[serde(alias = "to")]
    pub destination: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub cabin_class: Option<String>,
    #[serde(alias = "adults")]
    pub passengers: Option<u32>,
    pub max_price: Option<String>,
    pub max_stops: Option<i32>,
    pub sort: Option<String>,
}

/// Booking / visa application listing
#[derive(Debug, Default, Deserialize)]
pub struct StatusListQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Customer query listing
#[derive(Debug, Default, Deserialize)]
pub struct QueryListQuery {
    pub resolved: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
