//! CMS page entity and repository trait.
//!
//! Maps to the `pages` table (about, terms, privacy, ...).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPage {
    #[serde(with = "crate::shared::id_string")]
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub title_bn: Option<String>,
    pub content: String,
    pub content_bn: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentPageRepository: Send + Sync {
    /// Ordered by title.
    async fn list(&self, published_only: bool) -> Result<Vec<ContentPage>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ContentPage>, AppError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ContentPage>, AppError>;

    async fn create(&self, page: &ContentPage) -> Result<ContentPage, AppError>;

    async fn update(&self, page: &ContentPage) -> Result<ContentPage, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
