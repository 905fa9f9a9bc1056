//! Contact-form query entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Page, Pagination};
use crate::shared::error::AppError;

/// A message sent through the site's contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerQuery {
    #[serde(with = "crate::shared::id_string")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_resolved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerQueryRepository: Send + Sync {
    /// Newest first.
    async fn list(
        &self,
        resolved: Option<bool>,
        pagination: Pagination,
    ) -> Result<Page<CustomerQuery>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<CustomerQuery>, AppError>;

    async fn create(&self, query: &CustomerQuery) -> Result<CustomerQuery, AppError>;

    /// Returns `false` when no row existed.
    async fn set_resolved(
        &self,
        id: i64,
        resolved: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
