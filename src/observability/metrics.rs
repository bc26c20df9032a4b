//! Metrics collection and exposition.
//!
//! # Metrics
//! - `notifications_requests_total` (counter): requests by route, status
//! - `notifications_request_duration_seconds` (histogram): latency by route
//! - `notifications_not_found_total` (counter): paths no route matched
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder the calls are no-ops, so tests need no setup
//! - Unmatched requests are labelled `route="none"`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

const REQUESTS_TOTAL: &str = "notifications_requests_total";
const REQUEST_DURATION: &str = "notifications_request_duration_seconds";
const NOT_FOUND_TOTAL: &str = "notifications_not_found_total";

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    metrics::describe_counter!(REQUESTS_TOTAL, "Requests dispatched, by route and status");
    metrics::describe_histogram!(
        REQUEST_DURATION,
        metrics::Unit::Seconds,
        "Time from dispatch to response, by route"
    );
    metrics::describe_counter!(NOT_FOUND_TOTAL, "Requests whose path matched no route");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a dispatched request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    metrics::counter!(
        REQUESTS_TOTAL,
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION, "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a request that matched no route.
pub fn record_not_found(start: Instant) {
    metrics::counter!(NOT_FOUND_TOTAL).increment(1);
    record_request("none", 404, start);
}
