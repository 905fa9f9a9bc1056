//! # Domain Layer
//!
//! Catalog and booking records of the travel agency, independent of HTTP
//! and SQL.
//!
//! ## Structure
//!
//! - **entities**: records, filters, status workflows and repository traits
//! - **value_objects**: locale, pagination and slug helpers
//!
//! Filtering and sorting rules are expressed here as plain Rust so the SQL
//! repositories and in-memory test doubles agree on their meaning.

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
