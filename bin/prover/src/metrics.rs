//! Prometheus metrics for the prover.
//!
//! All metrics are aggregated in the [`Metrics`] struct for easy tracking and management.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Aggregated metrics for the prover.
///
/// Metrics are registered with the global metrics registry on creation.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_counter!(
            "prover_withdrawals_assembled_total",
            "Total number of MessagePassed logs decoded, verified and hashed"
        );
        describe_counter!(
            "prover_integrity_mismatch_total",
            "Total number of logs whose embedded withdrawal hash did not match"
        );
        describe_counter!(
            "prover_malformed_logs_total",
            "Total number of logs rejected as malformed"
        );
        describe_counter!(
            "prover_task_executions_total",
            "Total number of proof worker runs by task name"
        );
        describe_histogram!(
            "prover_assemble_duration_seconds",
            "Duration of one assembly pass over an input file in seconds"
        );
    }

    /// Record a successfully assembled withdrawal.
    pub fn record_assembled(&self) {
        counter!("prover_withdrawals_assembled_total").increment(1);
    }

    /// Record a withdrawal hash mismatch.
    pub fn record_integrity_mismatch(&self) {
        counter!("prover_integrity_mismatch_total").increment(1);
    }

    /// Record a malformed log.
    pub fn record_malformed(&self) {
        counter!("prover_malformed_logs_total").increment(1);
    }

    /// Record a run of a sleeper task worker.
    pub fn record_task_execution(&self, task: &str, duration: Duration) {
        counter!("prover_task_executions_total", "task" => task.to_string()).increment(1);
        histogram!("prover_assemble_duration_seconds").record(duration.as_secs_f64());
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
