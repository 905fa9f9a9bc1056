//! # Travel Desk
//!
//! Travel agency API server.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and migrations
//! - HTTP server

use anyhow::Result;
use tracing::info;

use travel_desk::config::Settings;
use travel_desk::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is read before the subscriber so RUST_LOG and LOG_FORMAT apply
    let _ = dotenvy::dotenv();
    travel_desk::telemetry::init_tracing();

    info!("Starting Travel Desk...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
