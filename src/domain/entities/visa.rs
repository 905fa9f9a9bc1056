//! Visa product entity and repository trait.
//!
//! Maps to the `visas` table: one row per country and visa type the agency
//! processes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visa {
    #[serde(with = "crate::shared::id_string")]
    pub id: i64,
    pub country: String,
    /// Free-form type such as `tourist`, `business`, `student`
    pub visa_type: String,
    pub processing_days: i32,
    pub validity_days: i32,
    /// Agency fee including embassy charges
    pub fee: Decimal,
    /// Documents the applicant must provide
    pub requirements: Vec<String>,
    pub description: String,
    pub description_bn: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for visas.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisaRepository: Send + Sync {
    /// Ordered by country, then visa type. `country` matches exactly,
    /// ignoring case.
    async fn list(&self, active_only: bool, country: Option<String>)
        -> Result<Vec<Visa>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Visa>, AppError>;

    async fn create(&self, visa: &Visa) -> Result<Visa, AppError>;

    async fn update(&self, visa: &Visa) -> Result<Visa, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
