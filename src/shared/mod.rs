//! Shared Utilities
//!
//! Error type, input validation helpers and snowflake ids used by every
//! layer.

pub mod error;
pub mod id_string;
pub mod snowflake;
pub mod validation;
