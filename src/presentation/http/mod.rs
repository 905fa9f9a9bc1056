//! HTTP API
//!
//! Router, handlers and extractors for the public and admin JSON API.

pub mod extractors;
pub mod handlers;
pub mod routes;
