//! Customer Query Service
//!
//! Contact-form messages and the back-office inbox.

use std::sync::Arc;

use chrono::Utc;

use crate::application::dto::request::QueryRequest;
use crate::domain::{CustomerQuery, CustomerQueryRepository, Page, Pagination};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::non_blank;

/// Query service errors
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Query not found")]
    NotFound,

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::NotFound => AppError::NotFound(e.to_string()),
            QueryError::App(e) => e,
        }
    }
}

/// QueryService implementation
pub struct QueryService {
    queries: Arc<dyn CustomerQueryRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl QueryService {
    pub fn new(
        queries: Arc<dyn CustomerQueryRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            queries,
            id_generator,
        }
    }

    pub async fn submit(&self, req: QueryRequest) -> Result<CustomerQuery, QueryError> {
        let now = Utc::now();
        let query = CustomerQuery {
            id: self.id_generator.generate(),
            name: req.name.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            phone: non_blank(req.phone),
            subject: req.subject.trim().to_string(),
            message: req.message.trim().to_string(),
            is_resolved: false,
            created_at: now,
            updated_at: now,
        };

        let created = self.queries.create(&query).await?;
        metrics::record_submission("query");
        tracing::info!(query_id = created.id, subject = %created.subject, "Customer query received");
        Ok(created)
    }

    pub async fn list(
        &self,
        resolved: Option<bool>,
        pagination: Pagination,
    ) -> Result<Page<CustomerQuery>, QueryError> {
        Ok(self.queries.list(resolved, pagination).await?)
    }

    /// Mark a query resolved (or reopen it).
    pub async fn resolve(&self, id: i64, resolved: bool) -> Result<CustomerQuery, QueryError> {
        if !self.queries.set_resolved(id, resolved, Utc::now()).await? {
            return Err(QueryError::NotFound);
        }
        tracing::info!(query_id = id, resolved, "Customer query updated");

        self.queries
            .find_by_id(id)
            .await?
            .ok_or(QueryError::NotFound)
    }

    pub async fn delete(&self, id: i64) -> Result<(), QueryError> {
        if !self.queries.delete(id).await? {
            return Err(QueryError::NotFound);
        }
        Ok(())
    }
}
