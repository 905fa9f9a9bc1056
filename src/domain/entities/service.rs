//! Service offering entity and repository trait.
//!
//! Maps to the `services` table. A service is one of the agency's product
//! lines (air ticketing, visa processing, car rental, ...), shown on the
//! marketing site with its own landing page.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Product line a service belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Flight,
    Holiday,
    Visa,
    CarRental,
    Hotel,
    TourGuide,
    Insurance,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 7] = [
        Self::Flight,
        Self::Holiday,
        Self::Visa,
        Self::CarRental,
        Self::Hotel,
        Self::TourGuide,
        Self::Insurance,
    ];

    /// Parse from the database / query representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "flight" | "flights" => Some(Self::Flight),
            "holiday" | "holidays" | "package" => Some(Self::Holiday),
            "visa" => Some(Self::Visa),
            "car_rental" | "car" => Some(Self::CarRental),
            "hotel" | "hotel_rental" => Some(Self::Hotel),
            "tour_guide" | "guide" => Some(Self::TourGuide),
            "insurance" => Some(Self::Insurance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Holiday => "holiday",
            Self::Visa => "visa",
            Self::CarRental => "car_rental",
            Self::Hotel => "hotel",
            Self::TourGuide => "tour_guide",
            Self::Insurance => "insurance",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A service offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(with = "crate::shared::id_string")]
    pub id: i64,
    /// Unique URL slug
    pub slug: String,
    pub kind: ServiceKind,
    pub title: String,
    pub title_bn: Option<String>,
    pub description: String,
    pub description_bn: Option<String>,
    pub icon: Option<String>,
    pub image_url: Option<String>,
    /// "Starting from" price shown on cards
    pub price_from: Option<Decimal>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Ordered by `sort_order`, then title.
    async fn list(
        &self,
        active_only: bool,
        kind: Option<ServiceKind>,
    ) -> Result<Vec<Service>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Service>, AppError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Service>, AppError>;

    async fn create(&self, service: &Service) -> Result<Service, AppError>;

    async fn update(&self, service: &Service) -> Result<Service, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
