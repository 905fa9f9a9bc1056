//! Request tracing and metrics

use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::Request as HttpRequest,
    middleware::Next,
    response::Response,
};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

use crate::infrastructure::metrics;

/// Trace layer emitting one span per request.
pub fn create_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl Fn(&HttpRequest<Body>) -> Span + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|request: &HttpRequest<Body>| {
            let route = request
                .extensions()
                .get::<MatchedPath>()
                .map(|p| p.as_str().to_owned())
                .unwrap_or_else(|| request.uri().path().to_owned());
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                route = %route,
            )
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// Record request count and latency per matched route.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    // Unmatched paths share one label so scanners cannot blow up cardinality.
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;

    metrics::record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
