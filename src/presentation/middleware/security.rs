//! Security Headers Middleware
//!
//! Adds hardening headers to every API response. The API only serves JSON,
//! so the content security policy forbids everything.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request, Response},
};
use tower::{Layer, Service};

const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

/// Security headers configuration
#[derive(Clone, Debug)]
pub struct SecurityHeadersConfig {
    /// Send `Strict-Transport-Security`; only meaningful behind HTTPS
    pub enable_hsts: bool,
    pub hsts_max_age: u64,
    pub content_security_policy: &'static str,
    pub referrer_policy: &'static str,
    pub permissions_policy: &'static str,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enable_hsts: true,
            hsts_max_age: 31_536_000,
            content_security_policy: "default-src 'none'; frame-ancestors 'none'",
            referrer_policy: "no-referrer",
            permissions_policy: "geolocation=(), microphone=(), camera=(), payment=()",
        }
    }
}

impl SecurityHeadersConfig {
    /// Defaults with HSTS turned off in development.
    pub fn for_environment(is_development: bool) -> Self {
        Self {
            enable_hsts: !is_development,
            ..Default::default()
        }
    }

    fn headers(&self) -> Vec<(HeaderName, HeaderValue)> {
        let mut headers = vec![
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
            (
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(self.content_security_policy),
            ),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static(self.referrer_policy),
            ),
            (
                PERMISSIONS_POLICY,
                HeaderValue::from_static(self.permissions_policy),
            ),
        ];
        if self.enable_hsts {
            let hsts = format!("max-age={}; includeSubDomains", self.hsts_max_age);
            if let Ok(value) = HeaderValue::from_str(&hsts) {
                headers.push((header::STRICT_TRANSPORT_SECURITY, value));
            }
        }
        headers
    }
}

/// Layer that adds security headers to responses
#[derive(Clone)]
pub struct SecurityHeadersLayer {
    headers: std::sync::Arc<Vec<(HeaderName, HeaderValue)>>,
}

impl SecurityHeadersLayer {
    pub fn new(config: SecurityHeadersConfig) -> Self {
        Self {
            headers: std::sync::Arc::new(config.headers()),
        }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersMiddleware {
            inner,
            headers: self.headers.clone(),
        }
    }
}

/// Middleware service that adds security headers
#[derive(Clone)]
pub struct SecurityHeadersMiddleware<S> {
    inner: S,
    headers: std::sync::Arc<Vec<(HeaderName, HeaderValue)>>,
}

impl<S> Service<Request<Body>> for SecurityHeadersMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let headers = self.headers.clone();

        Box::pin(async move {
            let mut response = inner.call(request).await?;
            let response_headers = response.headers_mut();
            for (name, value) in headers.iter() {
                response_headers.insert(name.clone(), value.clone());
            }
            Ok(response)
        })
    }
}

/// Security headers layer for the given environment.
pub fn create_security_headers_layer(is_development: bool) -> SecurityHeadersLayer {
    SecurityHeadersLayer::new(SecurityHeadersConfig::for_environment(is_development))
}
