//! Visa application entity and repository trait.
//!
//! Maps to the `visa_applications` table.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Page, Pagination};
use crate::shared::error::AppError;

/// Processing state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaApplicationStatus {
    #[default]
    Pending,
    Processing,
    Approved,
    Rejected,
}

impl VisaApplicationStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// pending → processing | rejected; processing → approved | rejected.
    pub fn can_transition_to(&self, next: VisaApplicationStatus) -> bool {
        use VisaApplicationStatus::*;
        *self == next
            || matches!(
                (self, next),
                (Pending, Processing)
                    | (Pending, Rejected)
                    | (Processing, Approved)
                    | (Processing, Rejected)
            )
    }
}

impl std::fmt::Display for VisaApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisaApplication {
    #[serde(with = "crate::shared::id_string")]
    pub id: i64,
    #[serde(with = "crate::shared::id_string")]
    pub visa_id: i64,
    pub applicant_name: String,
    pub email: String,
    pub phone: String,
    pub passport_number: String,
    pub nationality: String,
    pub travel_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: VisaApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisaApplicationRepository: Send + Sync {
    /// Newest first.
    async fn list(
        &self,
        status: Option<VisaApplicationStatus>,
        pagination: Pagination,
    ) -> Result<Page<VisaApplication>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<VisaApplication>, AppError>;

    async fn create(&self, application: &VisaApplication) -> Result<VisaApplication, AppError>;

    /// Move the row from `from` to `to`. Returns `false` when no row with
    /// that id is currently in `from`.
    async fn update_status(
        &self,
        id: i64,
        from: VisaApplicationStatus,
        to: VisaApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
