//! Database Module
//!
//! MariaDB/MySQL connection pool, migrations and readiness probing.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::config::DatabaseSettings;
use crate::infrastructure::metrics;

/// Create a MySQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &MySqlPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Outcome of a database round-trip check.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub latency_ms: u64,
}

/// Readiness check against the backing store.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn ping(&self) -> Result<ProbeResult, String>;
}

/// Probe that runs `SELECT 1` on the pool.
pub struct MySqlProbe {
    pool: MySqlPool,
}

impl MySqlProbe {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseProbe for MySqlProbe {
    async fn ping(&self) -> Result<ProbeResult, String> {
        let start = Instant::now();
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| e.to_string())?;

        let idle = self.pool.num_idle() as u32;
        let size = self.pool.size();
        let max = self.pool.options().get_max_connections();
        metrics::update_db_pool_stats(idle, size.saturating_sub(idle), max);

        Ok(ProbeResult {
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
