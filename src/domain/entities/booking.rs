//! Booking request entity and repository trait.
//!
//! Maps to the `bookings` table. A booking is a customer's reservation
//! request; staff approve or decline it from the back-office.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Page, Pagination};
use crate::shared::error::AppError;

/// What is being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Flight,
    Package,
    Service,
}

impl BookingKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flight" => Some(Self::Flight),
            "package" | "holiday" => Some(Self::Package),
            "service" => Some(Self::Service),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Package => "package",
            Self::Service => "service",
        }
    }
}

/// Review state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Declined,
}

impl BookingStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Declined => "declined",
        }
    }

    /// Allowed moves: pending → approved | declined, approved → declined.
    /// Re-applying the current status is accepted.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        *self == next
            || matches!(
                (self, next),
                (Pending, Approved) | (Pending, Declined) | (Approved, Declined)
            )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(with = "crate::shared::id_string")]
    pub id: i64,
    pub kind: BookingKind,
    /// Package, flight or service the request refers to
    #[serde(with = "crate::shared::id_string::option")]
    pub reference_id: Option<i64>,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub travellers: i32,
    pub travel_date: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Snapshot of what the customer saw (route, fare, package title, ...)
    pub details: serde_json::Value,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Newest first.
    async fn list(
        &self,
        status: Option<BookingStatus>,
        pagination: Pagination,
    ) -> Result<Page<Booking>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError>;

    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;

    /// Move the row from `from` to `to`. Returns `false` when no row with
    /// that id is currently in `from`.
    async fn update_status(
        &self,
        id: i64,
        from: BookingStatus,
        to: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
