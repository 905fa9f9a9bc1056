//! Application Layer
//!
//! Catalog, flight, submission and settings services plus the request and
//! response DTOs the HTTP layer exchanges with them.

pub mod dto;
pub mod services;
