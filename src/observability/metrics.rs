//! Metrics collection and exposition.
//!
//! # Metrics
//! - `registry_operations_total` (counter): registry calls by operation, outcome
//! - `registry_products` (gauge): current number of stored products
//! - `http_requests_total` (counter): responses by method, status

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::registry::RegistryResult;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one registry operation under its outcome label.
pub fn record_operation<T>(operation: &'static str, result: &RegistryResult<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    counter!("registry_operations_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

pub fn set_product_count(count: usize) {
    gauge!("registry_products").set(count as f64);
}

pub fn record_response(method: &str, status: u16) {
    counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
