//! Visa Application Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder};

use super::sql::unknown_value;
use crate::domain::{
    Page, Pagination, VisaApplication, VisaApplicationRepository, VisaApplicationStatus,
};
use crate::shared::error::AppError;

const COLUMNS: &str = "id, visa_id, applicant_name, email, phone, passport_number, \
    nationality, travel_date, notes, status, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    id: i64,
    visa_id: i64,
    applicant_name: String,
    email: String,
    phone: String,
    passport_number: String,
    nationality: String,
    travel_date: Option<NaiveDate>,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_application(self) -> Result<VisaApplication, AppError> {
        let status = VisaApplicationStatus::parse(&self.status)
            .ok_or_else(|| unknown_value("visa_applications.status", &self.status))?;
        Ok(VisaApplication {
            id: self.id,
            visa_id: self.visa_id,
            applicant_name: self.applicant_name,
            email: self.email,
            phone: self.phone,
            passport_number: self.passport_number,
            nationality: self.nationality,
            travel_date: self.travel_date,
            notes: self.notes,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// MySQL visa application repository implementation.
#[derive(Clone)]
pub struct MySqlVisaApplicationRepository {
    pool: MySqlPool,
}

impl MySqlVisaApplicationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisaApplicationRepository for MySqlVisaApplicationRepository {
    async fn list(
        &self,
        status: Option<VisaApplicationStatus>,
        pagination: Pagination,
    ) -> Result<Page<VisaApplication>, AppError> {
        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM visa_applications");
        if let Some(status) = status {
            count.push(" WHERE status = ").push_bind(status.as_str());
        }
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM visa_applications", COLUMNS));
        if let Some(status) = status {
            query.push(" WHERE status = ").push_bind(status.as_str());
        }
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<ApplicationRow> = query.build_query_as().fetch_all(&self.pool).await?;
        let items = rows
            .into_iter()
            .map(ApplicationRow::into_application)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, total.max(0) as u64, pagination))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<VisaApplication>, AppError> {
        let sql = format!("SELECT {} FROM visa_applications WHERE id = ?", COLUMNS);
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ApplicationRow::into_application).transpose()
    }

    async fn create(&self, application: &VisaApplication) -> Result<VisaApplication, AppError> {
        sqlx::query(
            r#"
            INSERT INTO visa_applications (id, visa_id, applicant_name, email, phone,
                                           passport_number, nationality, travel_date, notes,
                                           status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(application.id)
        .bind(application.visa_id)
        .bind(&application.applicant_name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.passport_number)
        .bind(&application.nationality)
        .bind(application.travel_date)
        .bind(&application.notes)
        .bind(application.status.as_str())
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(application.id)
            .await?
            .ok_or_else(|| AppError::Internal("Visa application vanished after insert".into()))
    }

    async fn update_status(
        &self,
        id: i64,
        from: VisaApplicationStatus,
        to: VisaApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE visa_applications SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
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
        let result = sqlx::query("DELETE FROM visa_applications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
