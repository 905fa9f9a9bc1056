//! Visa Application Service
//!
//! Applications for a published visa and their processing workflow.

use std::sync::Arc;

use chrono::Utc;

use crate::application::dto::request::VisaApplicationRequest;
use crate::domain::{
    Page, Pagination, VisaApplication, VisaApplicationRepository, VisaApplicationStatus,
    VisaRepository,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::{non_blank, snowflake_id};

/// Visa application service errors
#[derive(Debug, thiserror::Error)]
pub enum VisaApplicationError {
    #[error("Visa application not found")]
    NotFound,

    #[error("Visa not found")]
    VisaNotFound,

    #[error("Applications for this visa are closed")]
    VisaInactive,

    #[error("Unknown application status")]
    UnknownStatus,

    #[error("Cannot change application from {from} to {to}")]
    InvalidTransition {
        from: VisaApplicationStatus,
        to: VisaApplicationStatus,
    },

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<VisaApplicationError> for AppError {
    fn from(e: VisaApplicationError) -> Self {
        match e {
            VisaApplicationError::NotFound => AppError::NotFound(e.to_string()),
            VisaApplicationError::VisaNotFound => AppError::invalid_field("visa_id", e.to_string()),
            VisaApplicationError::UnknownStatus => {
                AppError::invalid_field("status", e.to_string())
            }
            VisaApplicationError::VisaInactive | VisaApplicationError::InvalidTransition { .. } => {
                AppError::Conflict(e.to_string())
            }
            VisaApplicationError::App(e) => e,
        }
    }
}

/// VisaApplicationService implementation
pub struct VisaApplicationService {
    applications: Arc<dyn VisaApplicationRepository>,
    visas: Arc<dyn VisaRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl VisaApplicationService {
    pub fn new(
        applications: Arc<dyn VisaApplicationRepository>,
        visas: Arc<dyn VisaRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            applications,
            visas,
            id_generator,
        }
    }

    pub async fn submit(
        &self,
        req: VisaApplicationRequest,
    ) -> Result<VisaApplication, VisaApplicationError> {
        let visa_id = snowflake_id("visa_id", &req.visa_id)?;
        let visa = self
            .visas
            .find_by_id(visa_id)
            .await?
            .ok_or(VisaApplicationError::VisaNotFound)?;
        if !visa.is_active {
            return Err(VisaApplicationError::VisaInactive);
        }

        let now = Utc::now();
        let application = VisaApplication {
            id: self.id_generator.generate(),
            visa_id,
            applicant_name: req.applicant_name.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            phone: req.phone.trim().to_string(),
            passport_number: req.passport_number.trim().to_ascii_uppercase(),
            nationality: req.nationality.trim().to_string(),
            travel_date: req.travel_date,
            notes: non_blank(req.notes),
            status: VisaApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let created = self.applications.create(&application).await?;
        metrics::record_submission("visa_application");
        tracing::info!(
            application_id = created.id,
            visa_id,
            country = %visa.country,
            "Visa application received"
        );
        Ok(created)
    }

    pub async fn list(
        &self,
        status: Option<&str>,
        pagination: Pagination,
    ) -> Result<Page<VisaApplication>, VisaApplicationError> {
        let status = status
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| VisaApplicationStatus::parse(s).ok_or(VisaApplicationError::UnknownStatus))
            .transpose()?;
        Ok(self.applications.list(status, pagination).await?)
    }

    pub async fn get(&self, id: i64) -> Result<VisaApplication, VisaApplicationError> {
        self.applications
            .find_by_id(id)
            .await?
            .ok_or(VisaApplicationError::NotFound)
    }

    pub async fn change_status(
        &self,
        id: i64,
        status: &str,
    ) -> Result<VisaApplication, VisaApplicationError> {
        let next = VisaApplicationStatus::parse(status).ok_or(VisaApplicationError::UnknownStatus)?;
        let mut application = self.get(id).await?;

        if application.status == next {
            return Ok(application);
        }
        if !application.status.can_transition_to(next) {
            return Err(VisaApplicationError::InvalidTransition {
                from: application.status,
                to: next,
            });
        }

        let now = Utc::now();
        if !self
            .applications
            .update_status(id, application.status, next, now)
            .await?
        {
            // Changed by someone else since it was read
            let current = self.get(id).await?;
            if current.status == next {
                return Ok(current);
            }
            return Err(VisaApplicationError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }
        tracing::info!(
            application_id = id,
            from = application.status.as_str(),
            to = next.as_str(),
            decided = next.is_final(),
            "Visa application status changed"
        );

        application.status = next;
        application.updated_at = now;
        Ok(application)
    }

    pub async fn delete(&self, id: i64) -> Result<(), VisaApplicationError> {
        if !self.applications.delete(id).await? {
            return Err(VisaApplicationError::NotFound);
        }
        tracing::info!(application_id = id, "Visa application deleted");
        Ok(())
    }
}
