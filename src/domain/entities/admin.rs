//! Back-office administrator account and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Maps to the `admins` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - username: VARCHAR(64) NOT NULL UNIQUE
/// - password_hash: VARCHAR(255) NOT NULL (Argon2id PHC string)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(with = "crate::shared::id_string")]
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Usernames compare case-insensitively.
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    async fn create(&self, admin: &Admin) -> Result<Admin, AppError>;

    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> Result<(), AppError>;
}
