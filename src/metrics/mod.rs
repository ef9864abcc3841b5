//! Prometheus metrics module
//!
//! Recording functions go through the global `metrics` facade and are
//! no-ops until [`PublisherMetrics::install`] sets a recorder.

use crate::error::GatewayError;
use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Handle to the installed Prometheus recorder
#[derive(Clone)]
pub struct PublisherMetrics {
    handle: PrometheusHandle,
}

impl PublisherMetrics {
    /// Install the process-wide recorder; fails if one is already installed
    pub fn install() -> Result<Self, GatewayError> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| GatewayError::MetricsInstall(Box::new(e)))?;

        Self::register_metrics();

        Ok(Self { handle })
    }

    fn register_metrics() {
        describe_counter!(
            "publisher_messages_published_total",
            Unit::Count,
            "Messages accepted by the broker"
        );
        describe_counter!(
            "publisher_publish_failures_total",
            Unit::Count,
            "Failed publishes by error type"
        );
        describe_counter!(
            "publisher_reconnects_total",
            Unit::Count,
            "Reconnect attempts by outcome"
        );

        describe_histogram!(
            "publisher_publish_duration_seconds",
            Unit::Seconds,
            "Time from publish call to broker acceptance"
        );

        describe_gauge!(
            "publisher_broker_connected",
            Unit::Count,
            "Broker link status (1=connected, 0=disconnected)"
        );
    }

    /// Render metrics in Prometheus format
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Record a successful publish
pub fn record_publish(duration: Duration) {
    counter!("publisher_messages_published_total").increment(1);
    histogram!("publisher_publish_duration_seconds").record(duration.as_secs_f64());
}

/// Record a failed publish, labelled with [`GatewayError::error_type_label`]
pub fn record_publish_failure(error_type: &'static str) {
    counter!("publisher_publish_failures_total", "error_type" => error_type).increment(1);
}

/// Record a reconnect attempt outcome ("success" or "failure")
pub fn record_reconnect(outcome: &'static str) {
    counter!("publisher_reconnects_total", "outcome" => outcome).increment(1);
}

/// Set broker link status
pub fn set_broker_connected(connected: bool) {
    gauge!("publisher_broker_connected").set(if connected { 1.0 } else { 0.0 });
}
