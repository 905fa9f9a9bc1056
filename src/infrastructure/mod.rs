//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - MariaDB/MySQL connection pool and migrations
//! - Repository implementations
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
