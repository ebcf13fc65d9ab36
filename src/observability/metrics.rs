//! Metrics collection and exposition.
//!
//! # Metrics
//! - `envgate_requests_total` (counter): requests by method, status, rule
//! - `envgate_request_duration_seconds` (histogram): latency distribution
//!
//! Unmatched requests are recorded with rule label `none`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on its own listener.
///
/// Failure to start metrics is logged but not fatal; the gateway serves
/// traffic regardless.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, rule: &str, start_time: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("rule", rule.to_string()),
    ];
    counter!("envgate_requests_total", &labels).increment(1);
    histogram!("envgate_request_duration_seconds", &labels)
        .record(start_time.elapsed().as_secs_f64());
}
