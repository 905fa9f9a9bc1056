//! Booking Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder};

use super::sql::{decode_json, unknown_value};
use crate::domain::{Booking, BookingKind, BookingRepository, BookingStatus, Page, Pagination};
use crate::shared::error::AppError;

const COLUMNS: &str = "id, kind, reference_id, customer_name, email, phone, travellers, \
    travel_date, notes, details, status, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: i64,
    kind: String,
    reference_id: Option<i64>,
    customer_name: String,
    email: String,
    phone: String,
    travellers: i32,
    travel_date: Option<NaiveDate>,
    notes: Option<String>,
    details: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking, AppError> {
        let kind = BookingKind::parse(&self.kind)
            .ok_or_else(|| unknown_value("bookings.kind", &self.kind))?;
        let status = BookingStatus::parse(&self.status)
            .ok_or_else(|| unknown_value("bookings.status", &self.status))?;
        Ok(Booking {
            id: self.id,
            kind,
            reference_id: self.reference_id,
            customer_name: self.customer_name,
            email: self.email,
            phone: self.phone,
            travellers: self.travellers,
            travel_date: self.travel_date,
            notes: self.notes,
            details: decode_json("bookings.details", &self.details)?,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// MySQL booking repository implementation.
#[derive(Clone)]
pub struct MySqlBookingRepository {
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn list(
        &self,
        status: Option<BookingStatus>,
        pagination: Pagination,
    ) -> Result<Page<Booking>, AppError> {
        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM bookings");
        if let Some(status) = status {
            count.push(" WHERE status = ").push_bind(status.as_str());
        }
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<MySql>::new(format!("SELECT {} FROM bookings", COLUMNS));
        if let Some(status) = status {
            query.push(" WHERE status = ").push_bind(status.as_str());
        }
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<BookingRow> = query.build_query_as().fetch_all(&self.pool).await?;
        let items = rows
            .into_iter()
            .map(BookingRow::into_booking)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, total.max(0) as u64, pagination))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        let sql = format!("SELECT {} FROM bookings WHERE id = ?", COLUMNS);
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(BookingRow::into_booking).transpose()
    }

    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, kind, reference_id, customer_name, email, phone, travellers,
                                  travel_date, notes, details, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.id)
        .bind(booking.kind.as_str())
        .bind(booking.reference_id)
        .bind(&booking.customer_name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(booking.travellers)
        .bind(booking.travel_date)
        .bind(&booking.notes)
        .bind(booking.details.to_string())
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(booking.id)
            .await?
            .ok_or_else(|| AppError::Internal("Booking vanished after insert".into()))
    }

    async fn update_status(
        &self,
        id: i64,
        from: BookingStatus,
        to: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(to.as_str())
        .bind(updated_at)
        .bind(id)
        .bind(from.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
