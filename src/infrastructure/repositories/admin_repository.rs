//! Admin Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::domain::{Admin, AdminRepository};
use crate::shared::error::{map_unique_violation, AppError};

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
        }
    }
}

/// MySQL admin repository implementation.
#[derive(Clone)]
pub struct MySqlAdminRepository {
    pool: MySqlPool,
}

impl MySqlAdminRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for MySqlAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AppError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT id, username, password_hash, created_at, last_login_at
            FROM admins
            WHERE LOWER(username) = LOWER(?)
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, admin: &Admin) -> Result<Admin, AppError> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, username, password_hash, created_at, last_login_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(admin.id)
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(admin.created_at)
        .bind(admin.last_login_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Username already taken"))?;

        self.find_by_username(&admin.username)
            .await?
            .ok_or_else(|| AppError::Internal("Admin vanished after insert".into()))
    }

    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query("UPDATE admins SET last_login_at = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
