//! # Travel Desk Library
//!
//! Backend of a travel agency website:
//! - Public catalog API (packages, services, flights, visas, pages, partners)
//! - Public booking, visa application and contact forms
//! - Admin back-office API behind a bearer token
//! - MariaDB/MySQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Records, filters, status workflows and repository traits
//! - **Application Layer**: Services and DTOs
//! - **Infrastructure Layer**: Database pool, SQL repositories and metrics
//! - **Presentation Layer**: HTTP handlers, routes and middleware
//!
//! ## Module Structure
//!
//! ```text
//! travel_desk/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects and repository traits
//! +-- application/    Services and DTOs
//! +-- infrastructure/ Database, repositories and metrics
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Errors, validation, snowflake IDs
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
