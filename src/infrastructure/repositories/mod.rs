//! Repository Implementations
//!
//! MariaDB/MySQL implementations of the domain repository traits, plus the
//! [`Repositories`] bundle handed to the HTTP layer.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::MySqlPool;
//! use travel_desk::infrastructure::repositories::Repositories;
//!
//! async fn setup(pool: MySqlPool) {
//!     let repos = Repositories::mysql(pool);
//!     let featured = repos.packages.find_by_id(42).await;
//! }
//! ```

mod sql;

pub mod admin_repository;
pub mod booking_repository;
pub mod content_page_repository;
pub mod customer_query_repository;
pub mod flight_repository;
pub mod package_repository;
pub mod partner_repository;
pub mod service_repository;
pub mod site_setting_repository;
pub mod visa_application_repository;
pub mod visa_repository;

use std::sync::Arc;

use sqlx::MySqlPool;

use crate::domain::{
    AdminRepository, BookingRepository, ContentPageRepository, CustomerQueryRepository,
    FlightRepository, PackageRepository, PartnerRepository, ServiceRepository,
    SiteSettingRepository, VisaApplicationRepository, VisaRepository,
};
use crate::infrastructure::database::{DatabaseProbe, MySqlProbe};

pub use admin_repository::MySqlAdminRepository;
pub use booking_repository::MySqlBookingRepository;
pub use content_page_repository::MySqlContentPageRepository;
pub use customer_query_repository::MySqlCustomerQueryRepository;
pub use flight_repository::MySqlFlightRepository;
pub use package_repository::MySqlPackageRepository;
pub use partner_repository::MySqlPartnerRepository;
pub use service_repository::MySqlServiceRepository;
pub use site_setting_repository::MySqlSiteSettingRepository;
pub use visa_application_repository::MySqlVisaApplicationRepository;
pub use visa_repository::MySqlVisaRepository;

/// Every repository the application uses, behind trait objects so the
/// router can run against MySQL or test doubles.
#[derive(Clone)]
pub struct Repositories {
    pub packages: Arc<dyn PackageRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub flights: Arc<dyn FlightRepository>,
    pub visas: Arc<dyn VisaRepository>,
    pub pages: Arc<dyn ContentPageRepository>,
    pub partners: Arc<dyn PartnerRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub visa_applications: Arc<dyn VisaApplicationRepository>,
    pub queries: Arc<dyn CustomerQueryRepository>,
    pub settings: Arc<dyn SiteSettingRepository>,
    pub admins: Arc<dyn AdminRepository>,
    pub probe: Arc<dyn DatabaseProbe>,
}

impl Repositories {
    /// MySQL-backed repositories sharing one pool.
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            packages: Arc::new(MySqlPackageRepository::new(pool.clone())),
            services: Arc::new(MySqlServiceRepository::new(pool.clone())),
            flights: Arc::new(MySqlFlightRepository::new(pool.clone())),
            visas: Arc::new(MySqlVisaRepository::new(pool.clone())),
            pages: Arc::new(MySqlContentPageRepository::new(pool.clone())),
            partners: Arc::new(MySqlPartnerRepository::new(pool.clone())),
            bookings: Arc::new(MySqlBookingRepository::new(pool.clone())),
            visa_applications: Arc::new(MySqlVisaApplicationRepository::new(pool.clone())),
            queries: Arc::new(MySqlCustomerQueryRepository::new(pool.clone())),
            settings: Arc::new(MySqlSiteSettingRepository::new(pool.clone())),
            admins: Arc::new(MySqlAdminRepository::new(pool.clone())),
            probe: Arc::new(MySqlProbe::new(pool)),
        }
    }
}
