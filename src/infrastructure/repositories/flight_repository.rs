//! Flight Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use super::sql::unknown_value;
use crate::domain::{
    CabinClass, Flight, FlightRepository, FlightSearch, FlightSort, Page, Pagination,
};
use crate::shared::error::AppError;

const COLUMNS: &str = "id, airline, flight_number, origin, destination, departure_at, \
    arrival_at, cabin_class, price, seats_available, stops, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct FlightRow {
    id: i64,
    airline: String,
    flight_number: String,
    origin: String,
    destination: String,
    departure_at: DateTime<Utc>,
    arrival_at: DateTime<Utc>,
    cabin_class: String,
    price: Decimal,
    seats_available: i32,
    stops: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FlightRow {
    fn into_flight(self) -> Result<Flight, AppError> {
        let cabin_class = CabinClass::parse(&self.cabin_class)
            .ok_or_else(|| unknown_value("flights.cabin_class", &self.cabin_class))?;
        Ok(Flight {
            id: self.id,
            airline: self.airline,
            flight_number: self.flight_number,
            origin: self.origin,
            destination: self.destination,
            departure_at: self.departure_at,
            arrival_at: self.arrival_at,
            cabin_class,
            price: self.price,
            seats_available: self.seats_available,
            stops: self.stops,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// MySQL flight repository implementation.
#[derive(Clone)]
pub struct MySqlFlightRepository {
    pool: MySqlPool,
}

impl MySqlFlightRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FlightRepository for MySqlFlightRepository {
    async fn search(
        &self,
        criteria: &FlightSearch,
        sort: FlightSort,
    ) -> Result<Vec<Flight>, AppError> {
        let day_start = criteria.departure_date.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
        let day_end = criteria
            .departure_date
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc());
        let (Some(day_start), Some(day_end)) = (day_start, day_end) else {
            return Ok(Vec::new());
        };

        let mut query = QueryBuilder::<MySql>::new(format!("SELECT {} FROM flights", COLUMNS));
        query
            .push(" WHERE origin = ")
            .push_bind(criteria.origin.to_ascii_uppercase())
            .push(" AND destination = ")
            .push_bind(criteria.destination.to_ascii_uppercase())
            .push(" AND departure_at >= ")
            .push_bind(day_start)
            .push(" AND departure_at < ")
            .push_bind(day_end)
            .push(" AND seats_available >= ")
            .push_bind(i64::from(criteria.passengers));

        if let Some(cabin) = criteria.cabin_class {
            query.push(" AND cabin_class = ").push_bind(cabin.as_str());
        }
        if let Some(max) = criteria.max_price {
            query.push(" AND price <= ").push_bind(max);
        }
        if let Some(stops) = criteria.max_stops {
            query.push(" AND stops <= ").push_bind(stops);
        }
        query.push(" ORDER BY ").push(sort.order_by_sql());

        let rows: Vec<FlightRow> = query.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(FlightRow::into_flight).collect()
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Flight>, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flights")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {} FROM flights ORDER BY departure_at DESC, id DESC LIMIT ? OFFSET ?",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, FlightRow>(&sql)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(FlightRow::into_flight)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, total.max(0) as u64, pagination))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Flight>, AppError> {
        let sql = format!("SELECT {} FROM flights WHERE id = ?", COLUMNS);
        let row = sqlx::query_as::<_, FlightRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(FlightRow::into_flight).transpose()
    }

    async fn create(&self, flight: &Flight) -> Result<Flight, AppError> {
        sqlx::query(
            r#"
            INSERT INTO flights (id, airline, flight_number, origin, destination, departure_at,
                                 arrival_at, cabin_class, price, seats_available, stops,
                                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(flight.id)
        .bind(&flight.airline)
        .bind(&flight.flight_number)
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(flight.departure_at)
        .bind(flight.arrival_at)
        .bind(flight.cabin_class.as_str())
        .bind(flight.price)
        .bind(flight.seats_available)
        .bind(flight.stops)
        .bind(flight.created_at)
        .bind(flight.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(flight.id)
            .await?
            .ok_or_else(|| AppError::Internal("Flight vanished after insert".into()))
    }

    async fn update(&self, flight: &Flight) -> Result<Flight, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE flights
            SET airline = ?, flight_number = ?, origin = ?, destination = ?, departure_at = ?,
                arrival_at = ?, cabin_class = ?, price = ?, seats_available = ?, stops = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&flight.airline)
        .bind(&flight.flight_number)
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(flight.departure_at)
        .bind(flight.arrival_at)
        .bind(flight.cabin_class.as_str())
        .bind(flight.price)
        .bind(flight.seats_available)
        .bind(flight.stops)
        .bind(flight.updated_at)
        .bind(flight.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Flight not found".into()));
        }

        self.find_by_id(flight.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flight not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM flights WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
