//! Partner (airline, hotel chain, embassy desk) logos shown on the site.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    #[serde(with = "crate::shared::id_string")]
    pub id: i64,
    pub name: String,
    pub logo_url: String,
    pub website_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    /// Ordered by `sort_order`, then name.
    async fn list(&self, active_only: bool) -> Result<Vec<Partner>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Partner>, AppError>;

    async fn create(&self, partner: &Partner) -> Result<Partner, AppError>;

    async fn update(&self, partner: &Partner) -> Result<Partner, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
