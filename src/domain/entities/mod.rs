//! # Domain Entities
//!
//! Core records of the travel agency. Every entity maps to one table.
//!
//! ## Catalog
//!
//! - **Package**: holiday/tour product with filters and sort orders
//! - **Service**: product line landing pages (car rental, insurance, ...)
//! - **Flight**: scheduled flights with published fares
//! - **Visa**: visa products per country and type
//! - **ContentPage**: CMS pages
//! - **Partner**: partner logos
//!
//! ## Submissions
//!
//! - **Booking**: reservation requests with an approve/decline workflow
//! - **VisaApplication**: visa applications with a processing workflow
//! - **CustomerQuery**: contact-form messages
//!
//! ## Back-office
//!
//! - **SiteSetting**: key/value site configuration
//! - **Admin**: back-office accounts
//!
//! Repository traits are implemented in the infrastructure layer.

mod admin;
mod booking;
mod content_page;
mod customer_query;
mod flight;
mod package;
mod partner;
mod service;
mod site_setting;
mod visa;
mod visa_application;

pub use admin::{Admin, AdminRepository};
pub use booking::{Booking, BookingKind, BookingRepository, BookingStatus};
pub use content_page::{ContentPage, ContentPageRepository};
pub use customer_query::{CustomerQuery, CustomerQueryRepository};
pub use flight::{CabinClass, Flight, FlightRepository, FlightSearch, FlightSort};
pub use package::{
    Package, PackageFilter, PackageRepository, PackageSort, EFFECTIVE_PRICE_SQL,
};
pub use partner::{Partner, PartnerRepository};
pub use service::{Service, ServiceKind, ServiceRepository};
pub use site_setting::{
    is_public_key, is_valid_key, normalize_key, SettingsMap, SiteSettingRepository,
    PRIVATE_PREFIX,
};
pub use visa::{Visa, VisaRepository};
pub use visa_application::{VisaApplication, VisaApplicationRepository, VisaApplicationStatus};
