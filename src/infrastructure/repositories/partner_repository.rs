//! Partner Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::domain::{Partner, PartnerRepository};
use crate::shared::error::AppError;

const COLUMNS: &str =
    "id, name, logo_url, website_url, sort_order, is_active, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct PartnerRow {
    id: i64,
    name: String,
    logo_url: String,
    website_url: Option<String>,
    sort_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PartnerRow> for Partner {
    fn from(row: PartnerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            logo_url: row.logo_url,
            website_url: row.website_url,
            sort_order: row.sort_order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// MySQL partner repository implementation.
#[derive(Clone)]
pub struct MySqlPartnerRepository {
    pool: MySqlPool,
}

impl MySqlPartnerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartnerRepository for MySqlPartnerRepository {
    async fn list(&self, active_only: bool) -> Result<Vec<Partner>, AppError> {
        let sql = format!(
            "SELECT {} FROM partners WHERE (? = FALSE OR is_active = TRUE) \
             ORDER BY sort_order ASC, name ASC, id ASC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, PartnerRow>(&sql)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Partner>, AppError> {
        let sql = format!("SELECT {} FROM partners WHERE id = ?", COLUMNS);
        let row = sqlx::query_as::<_, PartnerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, partner: &Partner) -> Result<Partner, AppError> {
        sqlx::query(
            r#"
            INSERT INTO partners (id, name, logo_url, website_url, sort_order, is_active,
                                  created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(partner.id)
        .bind(&partner.name)
        .bind(&partner.logo_url)
        .bind(&partner.website_url)
        .bind(partner.sort_order)
        .bind(partner.is_active)
        .bind(partner.created_at)
        .bind(partner.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(partner.id)
            .await?
            .ok_or_else(|| AppError::Internal("Partner vanished after insert".into()))
    }

    async fn update(&self, partner: &Partner) -> Result<Partner, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE partners
            SET name = ?, logo_url = ?, website_url = ?, sort_order = ?, is_active = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&partner.name)
        .bind(&partner.logo_url)
        .bind(&partner.website_url)
        .bind(partner.sort_order)
        .bind(partner.is_active)
        .bind(partner.updated_at)
        .bind(partner.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Partner not found".into()));
        }

        self.find_by_id(partner.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM partners WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
