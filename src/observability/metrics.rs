//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_status_recomputes_total` (counter): snapshots computed
//! - `gateway_status_observations_total` (counter): by group, status
//! - `gateway_status_general_state` (gauge): 1=ok, 0=failing
//! - `gateway_status_recompute_duration_seconds` (histogram)
//!
//! # Design Decisions
//! - Metrics go through the `metrics` facade; without an installed
//!   recorder every call is a no-op, which keeps tests recorder-free
//! - Prometheus exporter runs its own listener

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::health::snapshot::{HealthSnapshot, OverallStatus};

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one recompute.
pub fn record_snapshot(snapshot: &HealthSnapshot, elapsed: Duration) {
    counter!("gateway_status_recomputes_total").increment(1);
    histogram!("gateway_status_recompute_duration_seconds").record(elapsed.as_secs_f64());

    for (group, observations) in snapshot.groups() {
        for observation in observations {
            counter!(
                "gateway_status_observations_total",
                "group" => group.clone(),
                "status" => observation.status.as_str()
            )
            .increment(1);
        }
    }

    let state = match snapshot.overall_status() {
        OverallStatus::Ok => 1.0,
        OverallStatus::Failing => 0.0,
    };
    gauge!("gateway_status_general_state").set(state);
}
