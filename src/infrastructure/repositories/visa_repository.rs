//! Visa Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use super::sql::{decode_list, encode_list};
use crate::domain::{Visa, VisaRepository};
use crate::shared::error::AppError;

const COLUMNS: &str = "id, country, visa_type, processing_days, validity_days, fee, \
    requirements, description, description_bn, is_active, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct VisaRow {
    id: i64,
    country: String,
    visa_type: String,
    processing_days: i32,
    validity_days: i32,
    fee: Decimal,
    requirements: String,
    description: String,
    description_bn: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VisaRow {
    fn into_visa(self) -> Result<Visa, AppError> {
        Ok(Visa {
            id: self.id,
            country: self.country,
            visa_type: self.visa_type,
            processing_days: self.processing_days,
            validity_days: self.validity_days,
            fee: self.fee,
            requirements: decode_list("visas.requirements", &self.requirements)?,
            description: self.description,
            description_bn: self.description_bn,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// MySQL visa repository implementation.
#[derive(Clone)]
pub struct MySqlVisaRepository {
    pool: MySqlPool,
}

impl MySqlVisaRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisaRepository for MySqlVisaRepository {
    async fn list(
        &self,
        active_only: bool,
        country: Option<String>,
    ) -> Result<Vec<Visa>, AppError> {
        let mut query =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM visas WHERE 1 = 1", COLUMNS));
        if active_only {
            query.push(" AND is_active = TRUE");
        }
        if let Some(country) = country.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()) {
            query.push(" AND country = ").push_bind(country);
        }
        query.push(" ORDER BY country ASC, visa_type ASC, id ASC");

        let rows: Vec<VisaRow> = query.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(VisaRow::into_visa).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Visa>, AppError> {
        let sql = format!("SELECT {} FROM visas WHERE id = ?", COLUMNS);
        let row = sqlx::query_as::<_, VisaRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(VisaRow::into_visa).transpose()
    }

    async fn create(&self, visa: &Visa) -> Result<Visa, AppError> {
        sqlx::query(
            r#"
            INSERT INTO visas (id, country, visa_type, processing_days, validity_days, fee,
                               requirements, description, description_bn, is_active,
                               created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(visa.id)
        .bind(&visa.country)
        .bind(&visa.visa_type)
        .bind(visa.processing_days)
        .bind(visa.validity_days)
        .bind(visa.fee)
        .bind(encode_list(&visa.requirements))
        .bind(&visa.description)
        .bind(&visa.description_bn)
        .bind(visa.is_active)
        .bind(visa.created_at)
        .bind(visa.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(visa.id)
            .await?
            .ok_or_else(|| AppError::Internal("Visa vanished after insert".into()))
    }

    async fn update(&self, visa: &Visa) -> Result<Visa, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE visas
            SET country = ?, visa_type = ?, processing_days = ?, validity_days = ?, fee = ?,
                requirements = ?, description = ?, description_bn = ?, is_active = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&visa.country)
        .bind(&visa.visa_type)
        .bind(visa.processing_days)
        .bind(visa.validity_days)
        .bind(visa.fee)
        .bind(encode_list(&visa.requirements))
        .bind(&visa.description)
        .bind(&visa.description_bn)
        .bind(visa.is_active)
        .bind(visa.updated_at)
        .bind(visa.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Visa not found".into()));
        }

        self.find_by_id(visa.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Visa not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM visas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
