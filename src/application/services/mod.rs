//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Admin login, JWT tokens, bootstrap account
//! - **CatalogService**: Packages, service pages, visas, static pages, partners
//! - **FlightService**: Flight search and maintenance
//! - **BookingService**: Booking requests and their review workflow
//! - **VisaApplicationService**: Visa applications and their processing workflow
//! - **QueryService**: Contact-form inbox
//! - **SettingsService**: Site settings

pub mod auth_service;
pub mod booking_service;
pub mod catalog_service;
pub mod flight_service;
pub mod query_service;
pub mod settings_service;
pub mod visa_application_service;

pub use auth_service::{AdminClaims, AdminSession, AuthError, AuthService, AuthServiceImpl};
pub use booking_service::{BookingError, BookingService};
pub use catalog_service::{CatalogError, CatalogRepositories, CatalogService};
pub use flight_service::{FlightError, FlightSearchResult, FlightService};
pub use query_service::{QueryError, QueryService};
pub use settings_service::{SettingsError, SettingsService};
pub use visa_application_service::{VisaApplicationError, VisaApplicationService};
