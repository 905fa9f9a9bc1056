//! Flight Service
//!
//! Flight search for the public site and flight maintenance for admins.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::application::dto::request::FlightRequest;
use crate::domain::{
    CabinClass, Flight, FlightRepository, FlightSearch, FlightSort, Page, Pagination,
};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::{iata_code, non_negative};

/// Flight service errors
#[derive(Debug, thiserror::Error)]
pub enum FlightError {
    #[error("Flight not found")]
    NotFound,

    #[error("Origin and destination must differ")]
    SameRoute,

    #[error("Arrival must be after departure")]
    ArrivalBeforeDeparture,

    #[error("Return date must not be before the departure date")]
    ReturnBeforeDeparture,

    #[error("Departure date is in the past")]
    DepartureInPast,

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<FlightError> for AppError {
    fn from(e: FlightError) -> Self {
        match e {
            FlightError::NotFound => AppError::NotFound(e.to_string()),
            FlightError::SameRoute => AppError::invalid_field("destination", e.to_string()),
            FlightError::ArrivalBeforeDeparture => {
                AppError::invalid_field("arrival_at", e.to_string())
            }
            FlightError::ReturnBeforeDeparture => {
                AppError::invalid_field("return_date", e.to_string())
            }
            FlightError::DepartureInPast => {
                AppError::invalid_field("departure_date", e.to_string())
            }
            FlightError::App(e) => e,
        }
    }
}

/// Outbound results plus the return leg when one was requested.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSearchResult {
    pub outbound: Vec<Flight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound: Option<Vec<Flight>>,
}

/// FlightService implementation
pub struct FlightService {
    flights: Arc<dyn FlightRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl FlightService {
    pub fn new(flights: Arc<dyn FlightRepository>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            flights,
            id_generator,
        }
    }

    /// Search one-way or, with `return_date`, round-trip. Departed flights
    /// are left out.
    pub async fn search(
        &self,
        criteria: FlightSearch,
        return_date: Option<NaiveDate>,
        sort: FlightSort,
    ) -> Result<FlightSearchResult, FlightError> {
        let criteria = FlightSearch {
            origin: iata_code("origin", &criteria.origin)?,
            destination: iata_code("destination", &criteria.destination)?,
            passengers: criteria.passengers.max(1),
            ..criteria
        };
        if criteria.origin == criteria.destination {
            return Err(FlightError::SameRoute);
        }
        let now = Utc::now();
        if criteria.departure_date < now.date_naive() {
            return Err(FlightError::DepartureInPast);
        }
        if return_date.is_some_and(|d| d < criteria.departure_date) {
            return Err(FlightError::ReturnBeforeDeparture);
        }

        let upcoming = |mut flights: Vec<Flight>| {
            flights.retain(|f| !f.has_departed(now));
            flights
        };
        let outbound = upcoming(self.flights.search(&criteria, sort).await?);
        let inbound = match return_date {
            Some(date) => Some(upcoming(
                self.flights.search(&criteria.reversed(date), sort).await?,
            )),
            None => None,
        };

        tracing::debug!(
            origin = %criteria.origin,
            destination = %criteria.destination,
            date = %criteria.departure_date,
            outbound = outbound.len(),
            "Flight search"
        );

        Ok(FlightSearchResult { outbound, inbound })
    }

    pub async fn list(&self, pagination: Pagination) -> Result<Page<Flight>, FlightError> {
        Ok(self.flights.list(pagination).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Flight, FlightError> {
        self.flights
            .find_by_id(id)
            .await?
            .ok_or(FlightError::NotFound)
    }

    pub async fn create(&self, req: FlightRequest) -> Result<Flight, FlightError> {
        let now = Utc::now();
        let flight = build_flight(self.id_generator.generate(), req, now, now)?;
        let created = self.flights.create(&flight).await?;
        tracing::info!(
            flight_id = created.id,
            flight_number = %created.flight_number,
            "Flight created"
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, req: FlightRequest) -> Result<Flight, FlightError> {
        let existing = self.get(id).await?;
        let flight = build_flight(id, req, existing.created_at, Utc::now())?;
        Ok(self.flights.update(&flight).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), FlightError> {
        if !self.flights.delete(id).await? {
            return Err(FlightError::NotFound);
        }
        tracing::info!(flight_id = id, "Flight deleted");
        Ok(())
    }
}

fn build_flight(
    id: i64,
    req: FlightRequest,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
) -> Result<Flight, FlightError> {
    let origin = iata_code("origin", &req.origin)?;
    let destination = iata_code("destination", &req.destination)?;
    if origin == destination {
        return Err(FlightError::SameRoute);
    }
    if req.arrival_at <= req.departure_at {
        return Err(FlightError::ArrivalBeforeDeparture);
    }
    let cabin_class = match req.cabin_class.as_deref().map(str::trim) {
        None | Some("") => CabinClass::default(),
        Some(raw) => CabinClass::parse(raw)
            .ok_or_else(|| AppError::invalid_field("cabin_class", "Unknown cabin class"))?,
    };

    Ok(Flight {
        id,
        airline: req.airline.trim().to_string(),
        flight_number: req.flight_number.trim().to_ascii_uppercase(),
        origin,
        destination,
        departure_at: req.departure_at,
        arrival_at: req.arrival_at,
        cabin_class,
        price: non_negative("price", req.price)?,
        seats_available: req.seats_available,
        stops: req.stops,
        created_at,
        updated_at,
    })
}
