//! Prometheus metrics for the relayer.

use ::metrics::{counter, describe_counter};

/// Aggregated metrics for the relayer.
///
/// Registers all metric descriptions with the global registry on creation.
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
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_counter!(
            "relayer_transactions_total",
            "Sidechain transactions processed"
        );
        describe_counter!(
            "relayer_messages_relayed_total",
            "Bridge messages successfully relayed to mainnet"
        );
        describe_counter!(
            "relayer_messages_skipped_total",
            "Bridge messages already handled on mainnet"
        );
        describe_counter!(
            "relayer_messages_not_affirmed_total",
            "Bridge messages without an affirmation quorum within the poll timeout"
        );
        describe_counter!(
            "relayer_messages_failed_total",
            "Bridge message relays that failed with a chain error"
        );
    }

    pub fn record_transaction(&self) {
        counter!("relayer_transactions_total").increment(1);
    }

    pub fn record_relayed(&self) {
        counter!("relayer_messages_relayed_total").increment(1);
    }

    pub fn record_skipped(&self) {
        counter!("relayer_messages_skipped_total").increment(1);
    }

    pub fn record_not_affirmed(&self) {
        counter!("relayer_messages_not_affirmed_total").increment(1);
    }

    pub fn record_failed(&self) {
        counter!("relayer_messages_failed_total").increment(1);
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
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
