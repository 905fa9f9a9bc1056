//! Flight entity, search criteria and repository trait.
//!
//! Maps to the `flights` table. Departure and arrival are stored in UTC;
//! a search date matches the UTC calendar date of departure.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Page, Pagination};
use crate::shared::error::AppError;

/// Cabin class of a fare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "economy" => Some(Self::Economy),
            "premium_economy" | "premium" => Some(Self::PremiumEconomy),
            "business" => Some(Self::Business),
            "first" | "first_class" => Some(Self::First),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::PremiumEconomy => "premium_economy",
            Self::Business => "business",
            Self::First => "first",
        }
    }
}

/// A scheduled flight with a published fare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    #[serde(with = "crate::shared::id_string")]
    pub id: i64,
    pub airline: String,
    pub flight_number: String,
    /// IATA code, uppercase
    pub origin: String,
    /// IATA code, uppercase
    pub destination: String,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub cabin_class: CabinClass,
    /// Fare per passenger
    pub price: Decimal,
    pub seats_available: i32,
    pub stops: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flight {
    pub fn duration_minutes(&self) -> i64 {
        (self.arrival_at - self.departure_at).num_minutes()
    }

    pub fn has_departed(&self, now: DateTime<Utc>) -> bool {
        self.departure_at <= now
    }

    pub fn has_seats_for(&self, passengers: u32) -> bool {
        i64::from(self.seats_available) >= i64::from(passengers)
    }
}

/// One-way search criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSearch {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub cabin_class: Option<CabinClass>,
    pub passengers: u32,
    pub max_price: Option<Decimal>,
    pub max_stops: Option<i32>,
}

impl FlightSearch {
    /// Same criteria for the return leg.
    pub fn reversed(&self, date: NaiveDate) -> Self {
        Self {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
            departure_date: date,
            ..self.clone()
        }
    }

    pub fn matches(&self, flight: &Flight) -> bool {
        flight.origin.eq_ignore_ascii_case(&self.origin)
            && flight.destination.eq_ignore_ascii_case(&self.destination)
            && flight.departure_at.date_naive() == self.departure_date
            && self.cabin_class.is_none_or(|c| c == flight.cabin_class)
            && flight.has_seats_for(self.passengers)
            && self.max_price.is_none_or(|max| flight.price <= max)
            && self.max_stops.is_none_or(|max| flight.stops <= max)
    }
}

/// Result ordering for flight searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightSort {
    #[default]
    Price,
    Departure,
    Duration,
}

impl FlightSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" | "cheapest" => Some(Self::Price),
            "departure" | "earliest" => Some(Self::Departure),
            "duration" | "fastest" => Some(Self::Duration),
            _ => None,
        }
    }

    pub fn order_by_sql(&self) -> &'static str {
        match self {
            Self::Price => "price ASC, departure_at ASC, id ASC",
            Self::Departure => "departure_at ASC, price ASC, id ASC",
            Self::Duration => {
                "TIMESTAMPDIFF(MINUTE, departure_at, arrival_at) ASC, price ASC, id ASC"
            }
        }
    }

    pub fn compare(&self, a: &Flight, b: &Flight) -> Ordering {
        let by_id = || a.id.cmp(&b.id);
        match self {
            Self::Price => a
                .price
                .cmp(&b.price)
                .then_with(|| a.departure_at.cmp(&b.departure_at))
                .then_with(by_id),
            Self::Departure => a
                .departure_at
                .cmp(&b.departure_at)
                .then_with(|| a.price.cmp(&b.price))
                .then_with(by_id),
            Self::Duration => a
                .duration_minutes()
                .cmp(&b.duration_minutes())
                .then_with(|| a.price.cmp(&b.price))
                .then_with(by_id),
        }
    }
}

/// Repository trait for flights.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn search(
        &self,
        criteria: &FlightSearch,
        sort: FlightSort,
    ) -> Result<Vec<Flight>, AppError>;

    /// All flights, latest departure first.
    async fn list(&self, pagination: Pagination) -> Result<Page<Flight>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Flight>, AppError>;

    async fn create(&self, flight: &Flight) -> Result<Flight, AppError>;

    async fn update(&self, flight: &Flight) -> Result<Flight, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
