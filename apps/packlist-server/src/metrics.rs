//! Prometheus metrics for packlist-server.
//!
//! Exposes server metrics in Prometheus format at the `/metrics` endpoint.

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Install the Prometheus recorder and return a handle for rendering.
///
/// Must be called once at server startup before any metrics are recorded.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        "packlist_http_requests_total",
        "Total number of API requests processed"
    );
    describe_histogram!(
        "packlist_http_request_duration_seconds",
        "Duration of API requests in seconds"
    );
    describe_counter!(
        "packlist_http_errors_total",
        "Total number of API error responses by status code"
    );

    Ok(handle)
}

/// Operation name for a matched route; `other` for routes outside the API.
fn operation_for(method: &axum::http::Method, route: &str) -> &'static str {
    packlist_api::ENDPOINTS
        .iter()
        .find(|e| e.method.as_str() == method.as_str() && e.route_template() == route)
        .map(|e| e.name)
        .unwrap_or("other")
}

pub fn record_request(operation: &'static str, status: u16, duration: std::time::Duration) {
    let outcome = if status < 400 { "ok" } else { "error" };
    counter!("packlist_http_requests_total", "operation" => operation, "status" => outcome)
        .increment(1);
    histogram!("packlist_http_request_duration_seconds", "operation" => operation)
        .record(duration.as_secs_f64());
    if status >= 400 {
        counter!("packlist_http_errors_total", "operation" => operation, "code" => status.to_string())
            .increment(1);
    }
}

/// A helper to time a request and record metrics on completion.
pub struct RequestTimer {
    operation: &'static str,
    start: Instant,
}

impl RequestTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    pub fn finish(self, status: u16) {
        record_request(self.operation, status, self.start.elapsed());
    }
}

/// Middleware recording one sample per API request.
pub async fn track(request: Request, next: Next) -> Response {
    let operation = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| operation_for(request.method(), p.as_str()))
        .unwrap_or("other");

    let timer = RequestTimer::new(operation);
    let response = next.run(request).await;
    timer.finish(response.status().as_u16());
    response
}
