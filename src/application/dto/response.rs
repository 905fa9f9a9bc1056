//! Response DTOs
//!
//! Data structures for API response bodies. Admin endpoints return the
//! domain records as-is; the public site gets localized views that leave
//! out back-office fields.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::services::{AdminSession, FlightSearchResult};
use crate::domain::{
    Booking, BookingStatus, CabinClass, ContentPage, CustomerQuery, Flight, Locale, Package, Page,
    Partner, Service, ServiceKind, Visa, VisaApplication, VisaApplicationStatus,
};

// ============================================================================
// Envelope
// ============================================================================

/// Success envelope: `{ "success": true, "data": ..., "meta"? }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// List body with pagination metadata.
    pub fn paged(page: Page<T>) -> Self {
        let meta = PageMeta {
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(),
        };
        Self {
            success: true,
            data: page.items,
            meta: Some(meta),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

// ============================================================================
// Auth
// ============================================================================

/// Login response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub username: String,
}

impl From<AdminSession> for TokenResponse {
    fn from(session: AdminSession) -> Self {
        Self {
            access_token: session.access_token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            username: session.username,
        }
    }
}

/// Current admin
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub id: String,
    pub username: String,
    pub role: String,
    pub expires_at: i64,
}

// ============================================================================
// Public catalog views
// ============================================================================

/// Package as shown on the public site
#[derive(Debug, Serialize)]
pub struct PackageView {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub category: String,
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub effective_price: Decimal,
    pub is_discounted: bool,
    pub duration_days: i32,
    pub duration_nights: i32,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub highlights: Vec<String>,
    pub is_featured: bool,
    pub lang: Locale,
}

impl PackageView {
    pub fn localized(package: Package, lang: Locale) -> Self {
        let discount_price = package.is_discounted().then_some(package.effective_price());
        Self {
            id: package.id.to_string(),
            title: lang.pick_owned(&package.title, package.title_bn.as_deref()),
            description: lang
                .pick_owned(&package.description, package.description_bn.as_deref()),
            effective_price: package.effective_price(),
            is_discounted: discount_price.is_some(),
            discount_price,
            price: package.price,
            destination: package.destination,
            category: package.category,
            duration_days: package.duration_days,
            duration_nights: package.duration_nights,
            image_url: package.image_url,
            images: package.images,
            highlights: package.highlights,
            is_featured: package.is_featured,
            lang,
        }
    }
}

/// Service as shown on the public site
#[derive(Debug, Serialize)]
pub struct ServiceView {
    pub id: String,
    pub slug: String,
    pub kind: ServiceKind,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub image_url: Option<String>,
    pub price_from: Option<Decimal>,
    pub lang: Locale,
}

impl ServiceView {
    pub fn localized(service: Service, lang: Locale) -> Self {
        Self {
            id: service.id.to_string(),
            title: lang.pick_owned(&service.title, service.title_bn.as_deref()),
            description: lang
                .pick_owned(&service.description, service.description_bn.as_deref()),
            slug: service.slug,
            kind: service.kind,
            icon: service.icon,
            image_url: service.image_url,
            price_from: service.price_from,
            lang,
        }
    }
}

/// Visa as shown on the public site
#[derive(Debug, Serialize)]
pub struct VisaView {
    pub id: String,
    pub country: String,
    pub visa_type: String,
    pub processing_days: i32,
    pub validity_days: i32,
    pub fee: Decimal,
    pub requirements: Vec<String>,
    pub description: String,
    pub lang: Locale,
}

impl VisaView {
    pub fn localized(visa: Visa, lang: Locale) -> Self {
        Self {
            id: visa.id.to_string(),
            description: lang.pick_owned(&visa.description, visa.description_bn.as_deref()),
            country: visa.country,
            visa_type: visa.visa_type,
            processing_days: visa.processing_days,
            validity_days: visa.validity_days,
            fee: visa.fee,
            requirements: visa.requirements,
            lang,
        }
    }
}

/// Published page
#[derive(Debug, Serialize)]
pub struct PageView {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
    pub lang: Locale,
}

impl PageView {
    pub fn localized(page: ContentPage, lang: Locale) -> Self {
        Self {
            title: lang.pick_owned(&page.title, page.title_bn.as_deref()),
            content: lang.pick_owned(&page.content, page.content_bn.as_deref()),
            slug: page.slug,
            updated_at: page.updated_at,
            lang,
        }
    }
}

/// Partner logo
#[derive(Debug, Serialize)]
pub struct PartnerView {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub website_url: Option<String>,
}

impl From<Partner> for PartnerView {
    fn from(partner: Partner) -> Self {
        Self {
            id: partner.id.to_string(),
            name: partner.name,
            logo_url: partner.logo_url,
            website_url: partner.website_url,
        }
    }
}

/// Flight search hit
#[derive(Debug, Serialize)]
pub struct FlightView {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub duration_minutes: i64,
    pub cabin_class: CabinClass,
    pub price: Decimal,
    pub seats_available: i32,
    pub stops: i32,
}

impl From<Flight> for FlightView {
    fn from(flight: Flight) -> Self {
        Self {
            id: flight.id.to_string(),
            duration_minutes: flight.duration_minutes(),
            airline: flight.airline,
            flight_number: flight.flight_number,
            origin: flight.origin,
            destination: flight.destination,
            departure_at: flight.departure_at,
            arrival_at: flight.arrival_at,
            cabin_class: flight.cabin_class,
            price: flight.price,
            seats_available: flight.seats_available,
            stops: flight.stops,
        }
    }
}

/// Flight search results
#[derive(Debug, Serialize)]
pub struct FlightSearchResponse {
    pub outbound: Vec<FlightView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound: Option<Vec<FlightView>>,
}

impl From<FlightSearchResult> for FlightSearchResponse {
    fn from(result: FlightSearchResult) -> Self {
        Self {
            outbound: result.outbound.into_iter().map(Into::into).collect(),
            inbound: result
                .inbound
                .map(|legs| legs.into_iter().map(Into::into).collect()),
        }
    }
}

// ============================================================================
// Public submissions
// ============================================================================

/// Acknowledgement returned to the public site after a submission
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_date: Option<NaiveDate>,
}

impl From<Booking> for SubmissionResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            status: BookingStatus::as_str(&booking.status).to_string(),
            created_at: booking.created_at,
            travel_date: booking.travel_date,
        }
    }
}

impl From<VisaApplication> for SubmissionResponse {
    fn from(application: VisaApplication) -> Self {
        Self {
            id: application.id.to_string(),
            status: VisaApplicationStatus::as_str(&application.status).to_string(),
            created_at: application.created_at,
            travel_date: application.travel_date,
        }
    }
}

impl From<CustomerQuery> for SubmissionResponse {
    fn from(query: CustomerQuery) -> Self {
        Self {
            id: query.id.to_string(),
            status: if query.is_resolved { "resolved" } else { "open" }.to_string(),
            created_at: query.created_at,
            travel_date: None,
        }
    }
}
