//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;
pub mod logging;
pub mod rate_limit;
pub mod security;

pub use auth::{auth_middleware, AdminUser};
pub use logging::{create_trace_layer, track_metrics};
pub use rate_limit::{
    client_ip, rate_limit_login, rate_limit_submissions, RateLimitConfig, RateLimitInfo,
    RateLimiter,
};
pub use security::{create_security_headers_layer, SecurityHeadersConfig, SecurityHeadersLayer};
