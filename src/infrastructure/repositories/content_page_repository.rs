//! Content Page Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::domain::{ContentPage, ContentPageRepository};
use crate::shared::error::{map_unique_violation, AppError};

const COLUMNS: &str =
    "id, slug, title, title_bn, content, content_bn, is_published, created_at, updated_at";

const SLUG_TAKEN: &str = "A page with this slug already exists";

#[derive(Debug, sqlx::FromRow)]
struct PageRow {
    id: i64,
    slug: String,
    title: String,
    title_bn: Option<String>,
    content: String,
    content_bn: Option<String>,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PageRow> for ContentPage {
    fn from(row: PageRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            title_bn: row.title_bn,
            content: row.content,
            content_bn: row.content_bn,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// MySQL content page repository implementation.
#[derive(Clone)]
pub struct MySqlContentPageRepository {
    pool: MySqlPool,
}

impl MySqlContentPageRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentPageRepository for MySqlContentPageRepository {
    async fn list(&self, published_only: bool) -> Result<Vec<ContentPage>, AppError> {
        let sql = format!(
            "SELECT {} FROM pages WHERE (? = FALSE OR is_published = TRUE) ORDER BY title ASC, id ASC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, PageRow>(&sql)
            .bind(published_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ContentPage>, AppError> {
        let sql = format!("SELECT {} FROM pages WHERE id = ?", COLUMNS);
        let row = sqlx::query_as::<_, PageRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ContentPage>, AppError> {
        let sql = format!("SELECT {} FROM pages WHERE slug = ?", COLUMNS);
        let row = sqlx::query_as::<_, PageRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, page: &ContentPage) -> Result<ContentPage, AppError> {
        sqlx::query(
            r#"
            INSERT INTO pages (id, slug, title, title_bn, content, content_bn, is_published,
                               created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(page.id)
        .bind(&page.slug)
        .bind(&page.title)
        .bind(&page.title_bn)
        .bind(&page.content)
        .bind(&page.content_bn)
        .bind(page.is_published)
        .bind(page.created_at)
        .bind(page.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, SLUG_TAKEN))?;

        self.find_by_id(page.id)
            .await?
            .ok_or_else(|| AppError::Internal("Page vanished after insert".into()))
    }

    async fn update(&self, page: &ContentPage) -> Result<ContentPage, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE pages
            SET slug = ?, title = ?, title_bn = ?, content = ?, content_bn = ?,
                is_published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&page.slug)
        .bind(&page.title)
        .bind(&page.title_bn)
        .bind(&page.content)
        .bind(&page.content_bn)
        .bind(page.is_published)
        .bind(page.updated_at)
        .bind(page.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, SLUG_TAKEN))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Page not found".into()));
        }

        self.find_by_id(page.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Page not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
