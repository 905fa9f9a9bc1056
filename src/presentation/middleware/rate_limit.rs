//! Rate Limiting Middleware
//!
//! In-process sliding window limiter keyed by client IP. Guards the admin
//! login and the public submission endpoints against brute force and form
//! spam.

use std::collections::VecDeque;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::HeaderValue, HeaderMap},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::config::RateLimitSettings;
use crate::shared::error::AppError;
use crate::startup::AppState;

// ============================================================================
// Rate Limit Configuration
// ============================================================================

/// Limits for one guarded endpoint group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl RateLimitConfig {
    /// Admin login attempts from settings.
    pub fn login(settings: &RateLimitSettings) -> Self {
        Self {
            max_requests: settings.login_requests,
            window: Duration::from_secs(settings.window_seconds),
        }
    }

    /// Public form submissions from settings.
    pub fn submissions(settings: &RateLimitSettings) -> Self {
        Self {
            max_requests: settings.submission_requests,
            window: Duration::from_secs(settings.window_seconds),
        }
    }
}

/// Outcome of a limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: u32,
    pub remaining: u32,
    /// Seconds until a slot frees up; zero when the request was allowed
    pub retry_after: u64,
}

// ============================================================================
// Rate Limiter Implementation
// ============================================================================

/// Sliding window limiter.
///
/// Each key owns a queue of request instants. A check drops instants older
/// than the window, then admits the request if fewer than `max_requests`
/// remain. Rejected requests are not recorded, so a client that keeps
/// hammering is let back in as soon as its oldest request leaves the window.
pub struct RateLimiter {
    name: &'static str,
    config: RateLimitConfig,
    windows: DashMap<String, Mutex<VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(name: &'static str, config: RateLimitConfig) -> Self {
        Self {
            name,
            config,
            windows: DashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check and record a request for `key`.
    pub fn check(&self, key: &str) -> Result<RateLimitInfo, RateLimitInfo> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Result<RateLimitInfo, RateLimitInfo> {
        let limit = self.config.max_requests;
        let entry = self
            .windows
            .entry(key.to_owned())
            .or_insert_with(|| Mutex::new(VecDeque::new()));
        let mut hits = entry.lock();

        while let Some(&oldest) = hits.front() {
            if now.saturating_duration_since(oldest) >= self.config.window {
                hits.pop_front();
            } else {
                break;
            }
        }

        let used = hits.len() as u32;
        if used < limit {
            hits.push_back(now);
            return Ok(RateLimitInfo {
                limit,
                remaining: limit - used - 1,
                retry_after: 0,
            });
        }

        let wait = hits
            .front()
            .map(|&oldest| self.config.window.saturating_sub(now.saturating_duration_since(oldest)))
            .unwrap_or(self.config.window);
        Err(RateLimitInfo {
            limit,
            remaining: 0,
            retry_after: wait.as_secs_f64().ceil().max(1.0) as u64,
        })
    }

    /// Drop keys whose whole window has expired.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        let window = self.config.window;
        self.windows.retain(|_, hits| {
            hits.lock()
                .back()
                .is_some_and(|&last| now.saturating_duration_since(last) < window)
        });
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}

// ============================================================================
// Identifier Extraction
// ============================================================================

/// Client IP used as the limiter key.
///
/// The first `X-Forwarded-For` hop wins when it parses as an IP, then
/// `X-Real-IP`, then the socket address.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> Option<IpAddr> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|ip| ip.trim().parse::<IpAddr>().ok());

    forwarded
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .and_then(|ip| ip.trim().parse::<IpAddr>().ok())
        })
        .or(peer)
}

// ============================================================================
// Middleware
// ============================================================================

/// Rate limiting middleware for the admin login.
pub async fn rate_limit_login(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    enforce(&state.login_limiter, request, next).await
}

/// Rate limiting middleware for public form submissions.
pub async fn rate_limit_submissions(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    enforce(&state.submission_limiter, request, next).await
}

async fn enforce(
    limiter: &Arc<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Absent when the server runs without connect info (tests, some proxies)
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let key = match client_ip(request.headers(), peer) {
        Some(ip) => ip.to_string(),
        None => {
            tracing::warn!(limiter = limiter.name(), "Could not determine client IP");
            "unknown".to_owned()
        }
    };

    match limiter.check(&key) {
        Ok(info) => {
            let mut response = next.run(request).await;
            add_rate_limit_headers(response.headers_mut(), &info);
            Ok(response)
        }
        Err(info) => {
            tracing::warn!(
                limiter = limiter.name(),
                client = %key,
                retry_after = info.retry_after,
                "Rate limit exceeded"
            );
            Err(AppError::RateLimited {
                retry_after: info.retry_after,
            })
        }
    }
}

fn add_rate_limit_headers(headers: &mut HeaderMap, info: &RateLimitInfo) {
    if let Ok(v) = HeaderValue::from_str(&info.limit.to_string()) {
        headers.insert("x-ratelimit-limit", v);
    }
    if let Ok(v) = HeaderValue::from_str(&info.remaining.to_string()) {
        headers.insert("x-ratelimit-remaining", v);
    }
}

// ============================================================================
// Tests
// ============================================================================
