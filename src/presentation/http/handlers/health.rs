//! Health Check Handlers
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the process running?)
//! - `GET /health/ready` - Readiness probe (can the database be reached?)

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::startup::AppState;

static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Database round-trips slower than this report `degraded`.
const SLOW_DATABASE_MS: u64 = 250;

/// Pin the start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness report
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Returns 503 when the database cannot be reached.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.repos.probe.ping().await {
        Ok(probe) => DatabaseHealth {
            status: latency_status(probe.latency_ms),
            latency_ms: Some(probe.latency_ms),
            message: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database readiness check failed");
            DatabaseHealth {
                status: HealthStatus::Unhealthy,
                latency_ms: None,
                message: Some("Database unavailable".into()),
            }
        }
    };

    let status_code = match database.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let response = ReadinessResponse {
        status: database.status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: SERVER_START_TIME.to_rfc3339(),
        database,
    };

    (status_code, Json(response))
}

fn latency_status(latency_ms: u64) -> HealthStatus {
    if latency_ms < SLOW_DATABASE_MS {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    }
}
