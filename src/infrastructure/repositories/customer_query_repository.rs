//! Customer Query Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::domain::{CustomerQuery, CustomerQueryRepository, Page, Pagination};
use crate::shared::error::AppError;

const COLUMNS: &str =
    "id, name, email, phone, subject, message, is_resolved, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct QueryRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    is_resolved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<QueryRow> for CustomerQuery {
    fn from(row: QueryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            is_resolved: row.is_resolved,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// MySQL customer query repository implementation.
#[derive(Clone)]
pub struct MySqlCustomerQueryRepository {
    pool: MySqlPool,
}

impl MySqlCustomerQueryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerQueryRepository for MySqlCustomerQueryRepository {
    async fn list(
        &self,
        resolved: Option<bool>,
        pagination: Pagination,
    ) -> Result<Page<CustomerQuery>, AppError> {
        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM customer_queries");
        if let Some(resolved) = resolved {
            count.push(" WHERE is_resolved = ").push_bind(resolved);
        }
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM customer_queries", COLUMNS));
        if let Some(resolved) = resolved {
            query.push(" WHERE is_resolved = ").push_bind(resolved);
        }
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<QueryRow> = query.build_query_as().fetch_all(&self.pool).await?;
        let items = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(items, total.max(0) as u64, pagination))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CustomerQuery>, AppError> {
        let sql = format!("SELECT {} FROM customer_queries WHERE id = ?", COLUMNS);
        let row = sqlx::query_as::<_, QueryRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, query: &CustomerQuery) -> Result<CustomerQuery, AppError> {
        sqlx::query(
            r#"
            INSERT INTO customer_queries (id, name, email, phone, subject, message, is_resolved,
                                          created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(query.id)
        .bind(&query.name)
        .bind(&query.email)
        .bind(&query.phone)
        .bind(&query.subject)
        .bind(&query.message)
        .bind(query.is_resolved)
        .bind(query.created_at)
        .bind(query.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(query.id)
            .await?
            .ok_or_else(|| AppError::Internal("Query vanished after insert".into()))
    }

    async fn set_resolved(
        &self,
        id: i64,
        resolved: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE customer_queries SET is_resolved = ?, updated_at = ? WHERE id = ?")
                .bind(resolved)
                .bind(updated_at)
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM customer_queries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
