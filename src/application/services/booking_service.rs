//! Booking Service
//!
//! Booking requests submitted from the public site and their review in
//! the back-office.

use std::sync::Arc;

use chrono::Utc;

use crate::application::dto::request::BookingRequest;
use crate::domain::{
    Booking, BookingKind, BookingRepository, BookingStatus, FlightRepository, PackageRepository,
    Page, Pagination, ServiceRepository,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::{non_blank, snowflake_id};

/// Booking service errors
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Booking not found")]
    NotFound,

    #[error("Unknown booking kind")]
    UnknownKind,

    #[error("Unknown booking status")]
    UnknownStatus,

    #[error("A {0} booking needs a reference_id")]
    MissingReference(&'static str),

    #[error("Referenced {0} not found")]
    ReferenceNotFound(&'static str),

    #[error("{0}")]
    NotBookable(String),

    #[error("Cannot change booking from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::NotFound => AppError::NotFound(e.to_string()),
            BookingError::UnknownKind => AppError::invalid_field("kind", e.to_string()),
            BookingError::UnknownStatus => AppError::invalid_field("status", e.to_string()),
            BookingError::MissingReference(_) | BookingError::ReferenceNotFound(_) => {
                AppError::invalid_field("reference_id", e.to_string())
            }
            BookingError::NotBookable(msg) => AppError::Conflict(msg),
            BookingError::InvalidTransition { .. } => AppError::Conflict(e.to_string()),
            BookingError::App(e) => e,
        }
    }
}

/// BookingService implementation
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    packages: Arc<dyn PackageRepository>,
    flights: Arc<dyn FlightRepository>,
    services: Arc<dyn ServiceRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        packages: Arc<dyn PackageRepository>,
        flights: Arc<dyn FlightRepository>,
        services: Arc<dyn ServiceRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            bookings,
            packages,
            flights,
            services,
            id_generator,
        }
    }

    /// Record a booking request after checking the referenced item can be booked.
    pub async fn create(&self, req: BookingRequest) -> Result<Booking, BookingError> {
        let kind = BookingKind::parse(&req.kind).ok_or(BookingError::UnknownKind)?;
        let reference_id = non_blank(req.reference_id)
            .map(|raw| snowflake_id("reference_id", &raw))
            .transpose()?;

        self.check_bookable(kind, reference_id, req.travellers).await?;

        let now = Utc::now();
        let booking = Booking {
            id: self.id_generator.generate(),
            kind,
            reference_id,
            customer_name: req.customer_name.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            phone: req.phone.trim().to_string(),
            travellers: req.travellers,
            travel_date: req.travel_date,
            notes: non_blank(req.notes),
            details: req
                .details
                .filter(|d| !d.is_null())
                .unwrap_or_else(|| serde_json::json!({})),
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let created = self.bookings.create(&booking).await?;
        metrics::record_submission("booking");
        tracing::info!(
            booking_id = created.id,
            kind = created.kind.as_str(),
            reference_id = ?created.reference_id,
            "Booking request received"
        );
        Ok(created)
    }

    async fn check_bookable(
        &self,
        kind: BookingKind,
        reference_id: Option<i64>,
        travellers: i32,
    ) -> Result<(), BookingError> {
        match kind {
            BookingKind::Package => {
                let id = reference_id.ok_or(BookingError::MissingReference("package"))?;
                let package = self
                    .packages
                    .find_by_id(id)
                    .await?
                    .ok_or(BookingError::ReferenceNotFound("package"))?;
                if !package.is_active {
                    return Err(BookingError::NotBookable(
                        "This package is no longer offered".into(),
                    ));
                }
            }
            BookingKind::Flight => {
                let id = reference_id.ok_or(BookingError::MissingReference("flight"))?;
                let flight = self
                    .flights
                    .find_by_id(id)
                    .await?
                    .ok_or(BookingError::ReferenceNotFound("flight"))?;
                if flight.has_departed(Utc::now()) {
                    return Err(BookingError::NotBookable(
                        "This flight has already departed".into(),
                    ));
                }
                if !flight.has_seats_for(travellers.max(1) as u32) {
                    return Err(BookingError::NotBookable(format!(
                        "Only {} seats left on this flight",
                        flight.seats_available.max(0)
                    )));
                }
            }
            BookingKind::Service => {
                if let Some(id) = reference_id {
                    let service = self
                        .services
                        .find_by_id(id)
                        .await?
                        .ok_or(BookingError::ReferenceNotFound("service"))?;
                    if !service.is_active {
                        return Err(BookingError::NotBookable(
                            "This service is currently unavailable".into(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    pub async fn list(
        &self,
        status: Option<&str>,
        pagination: Pagination,
    ) -> Result<Page<Booking>, BookingError> {
        let status = status
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| BookingStatus::parse(s).ok_or(BookingError::UnknownStatus))
            .transpose()?;
        Ok(self.bookings.list(status, pagination).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Booking, BookingError> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or(BookingError::NotFound)
    }

    /// Move a booking through its review workflow.
    pub async fn change_status(&self, id: i64, status: &str) -> Result<Booking, BookingError> {
        let next = BookingStatus::parse(status).ok_or(BookingError::UnknownStatus)?;
        let mut booking = self.get(id).await?;

        if booking.status == next {
            return Ok(booking);
        }
        if !booking.status.can_transition_to(next) {
            return Err(BookingError::InvalidTransition {
                from: booking.status,
                to: next,
            });
        }

        let now = Utc::now();
        if !self
            .bookings
            .update_status(id, booking.status, next, now)
            .await?
        {
            // Changed by someone else since it was read
            let current = self.get(id).await?;
            if current.status == next {
                return Ok(current);
            }
            return Err(BookingError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }
        tracing::info!(
            booking_id = id,
            from = booking.status.as_str(),
            to = next.as_str(),
            "Booking status changed"
        );

        booking.status = next;
        booking.updated_at = now;
        Ok(booking)
    }

    pub async fn delete(&self, id: i64) -> Result<(), BookingError> {
        if !self.bookings.delete(id).await? {
            return Err(BookingError::NotFound);
        }
        tracing::info!(booking_id = id, "Booking deleted");
        Ok(())
    }
}
