//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hello_requests_total` (counter): greeting requests by status
//! - `hello_request_duration_seconds` (histogram): handler latency
//! - `grain_calls_total` (counter): grain turns by grain, outcome
//! - `grain_call_duration_seconds` (histogram): time spent in a turn
//! - `grain_activations` (gauge): live activations by grain

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("hello_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("hello_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_grain_call(grain: &'static str, ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("grain_calls_total", "grain" => grain, "outcome" => outcome).increment(1);
    metrics::histogram!("grain_call_duration_seconds", "grain" => grain)
        .record(start.elapsed().as_secs_f64());
}

pub fn activation_started(grain: &'static str) {
    metrics::gauge!("grain_activations", "grain" => grain).increment(1.0);
}

pub fn activation_stopped(grain: &'static str) {
    metrics::gauge!("grain_activations", "grain" => grain).decrement(1.0);
}
