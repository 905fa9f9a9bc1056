//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{
    AuthService, AuthServiceImpl, BookingService, CatalogRepositories, CatalogService,
    FlightService, QueryService, SettingsService, VisaApplicationService,
};
use crate::config::Settings;
use crate::infrastructure::database;
use crate::infrastructure::repositories::Repositories;
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{RateLimitConfig, RateLimiter};
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub snowflake: Arc<SnowflakeGenerator>,
    pub settings: Arc<Settings>,
    pub auth: Arc<dyn AuthService>,
    pub login_limiter: Arc<RateLimiter>,
    pub submission_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Wire services and limiters around a repository bundle.
    pub fn new(settings: Settings, repos: Repositories) -> Self {
        let snowflake = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.machine_id,
            settings.snowflake.epoch,
        ));
        let auth: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
            repos.admins.clone(),
            snowflake.clone(),
            settings.jwt.clone(),
        ));
        let login_limiter = Arc::new(RateLimiter::new(
            "login",
            RateLimitConfig::login(&settings.rate_limit),
        ));
        let submission_limiter = Arc::new(RateLimiter::new(
            "submissions",
            RateLimitConfig::submissions(&settings.rate_limit),
        ));

        Self {
            repos,
            snowflake,
            settings: Arc::new(settings),
            auth,
            login_limiter,
            submission_limiter,
        }
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(
            CatalogRepositories {
                packages: self.repos.packages.clone(),
                services: self.repos.services.clone(),
                visas: self.repos.visas.clone(),
                pages: self.repos.pages.clone(),
                partners: self.repos.partners.clone(),
            },
            self.snowflake.clone(),
        )
    }

    pub fn flights(&self) -> FlightService {
        FlightService::new(self.repos.flights.clone(), self.snowflake.clone())
    }

    pub fn bookings(&self) -> BookingService {
        BookingService::new(
            self.repos.bookings.clone(),
            self.repos.packages.clone(),
            self.repos.flights.clone(),
            self.repos.services.clone(),
            self.snowflake.clone(),
        )
    }

    pub fn visa_applications(&self) -> VisaApplicationService {
        VisaApplicationService::new(
            self.repos.visa_applications.clone(),
            self.repos.visas.clone(),
            self.snowflake.clone(),
        )
    }

    pub fn queries(&self) -> QueryService {
        QueryService::new(self.repos.queries.clone(), self.snowflake.clone())
    }

    pub fn site_settings(&self) -> SettingsService {
        SettingsService::new(self.repos.settings.clone())
    }

    /// Create the configured bootstrap admin when the admins table is empty.
    pub async fn bootstrap_admin(&self) -> Result<()> {
        let admin = &self.settings.admin;
        match (&admin.bootstrap_username, &admin.bootstrap_password) {
            (Some(username), Some(password)) => {
                self.auth
                    .ensure_bootstrap_admin(username, password)
                    .await
                    .context("Failed to create the bootstrap admin")?;
            }
            _ => tracing::debug!("No bootstrap admin configured"),
        }
        Ok(())
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let pool = database::create_pool(&settings.database)
            .await
            .context("Failed to connect to the database")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        let addr = settings.server.socket_addr()?;
        handlers::health::init_server_start();
        let state = AppState::new(settings, Repositories::mysql(pool));
        state.bootstrap_admin().await?;
        spawn_limiter_cleanup(&state);

        let router = routes::build_router(state);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Periodically forget clients whose rate limit window has expired.
fn spawn_limiter_cleanup(state: &AppState) {
    let limiters = [state.login_limiter.clone(), state.submission_limiter.clone()];
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            for limiter in &limiters {
                limiter.purge_expired();
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
