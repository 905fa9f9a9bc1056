//! Service Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use super::sql::unknown_value;
use crate::domain::{Service, ServiceKind, ServiceRepository};
use crate::shared::error::{map_unique_violation, AppError};

const COLUMNS: &str = "id, slug, kind, title, title_bn, description, description_bn, icon, \
    image_url, price_from, sort_order, is_active, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: i64,
    slug: String,
    kind: String,
    title: String,
    title_bn: Option<String>,
    description: String,
    description_bn: Option<String>,
    icon: Option<String>,
    image_url: Option<String>,
    price_from: Option<Decimal>,
    sort_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ServiceRow {
    fn into_service(self) -> Result<Service, AppError> {
        let kind = ServiceKind::parse(&self.kind)
            .ok_or_else(|| unknown_value("services.kind", &self.kind))?;
        Ok(Service {
            id: self.id,
            slug: self.slug,
            kind,
            title: self.title,
            title_bn: self.title_bn,
            description: self.description,
            description_bn: self.description_bn,
            icon: self.icon,
            image_url: self.image_url,
            price_from: self.price_from,
            sort_order: self.sort_order,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// MySQL service repository implementation.
#[derive(Clone)]
pub struct MySqlServiceRepository {
    pool: MySqlPool,
}

impl MySqlServiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for MySqlServiceRepository {
    async fn list(
        &self,
        active_only: bool,
        kind: Option<ServiceKind>,
    ) -> Result<Vec<Service>, AppError> {
        let mut query =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM services WHERE 1 = 1", COLUMNS));
        if active_only {
            query.push(" AND is_active = TRUE");
        }
        if let Some(kind) = kind {
            query.push(" AND kind = ").push_bind(kind.as_str());
        }
        query.push(" ORDER BY sort_order ASC, title ASC, id ASC");

        let rows: Vec<ServiceRow> = query.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(ServiceRow::into_service).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Service>, AppError> {
        let sql = format!("SELECT {} FROM services WHERE id = ?", COLUMNS);
        let row = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ServiceRow::into_service).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Service>, AppError> {
        let sql = format!("SELECT {} FROM services WHERE slug = ?", COLUMNS);
        let row = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ServiceRow::into_service).transpose()
    }

    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query(
            r#"
            INSERT INTO services (id, slug, kind, title, title_bn, description, description_bn,
                                  icon, image_url, price_from, sort_order, is_active,
                                  created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(service.id)
        .bind(&service.slug)
        .bind(service.kind.as_str())
        .bind(&service.title)
        .bind(&service.title_bn)
        .bind(&service.description)
        .bind(&service.description_bn)
        .bind(&service.icon)
        .bind(&service.image_url)
        .bind(service.price_from)
        .bind(service.sort_order)
        .bind(service.is_active)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A service with this slug already exists"))?;

        self.find_by_id(service.id)
            .await?
            .ok_or_else(|| AppError::Internal("Service vanished after insert".into()))
    }

    async fn update(&self, service: &Service) -> Result<Service, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE services
            SET slug = ?, kind = ?, title = ?, title_bn = ?, description = ?,
                description_bn = ?, icon = ?, image_url = ?, price_from = ?,
                sort_order = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&service.slug)
        .bind(service.kind.as_str())
        .bind(&service.title)
        .bind(&service.title_bn)
        .bind(&service.description)
        .bind(&service.description_bn)
        .bind(&service.icon)
        .bind(&service.image_url)
        .bind(service.price_from)
        .bind(service.sort_order)
        .bind(service.is_active)
        .bind(service.updated_at)
        .bind(service.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A service with this slug already exists"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Service not found".into()));
        }

        self.find_by_id(service.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
