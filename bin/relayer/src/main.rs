//! Bridge relay driver.
//!
//! Takes sidechain withdrawal transaction hashes and relays their bridge
//! messages to mainnet once affirmed. Re-running with the same hashes is
//! safe: messages the mainnet bridge has already seen are skipped.

mod config;
mod metrics;

use crate::{config::Config, metrics::Metrics};
use alloy_primitives::B256;
use clap::Parser;
use dataunion::DataUnionClient;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "relayer", about = "Relay data union withdrawals to mainnet")]
struct Args {
    /// Path to the relayer TOML configuration
    #[arg(long, default_value = "relayer.toml")]
    config: PathBuf,

    /// Port to expose Prometheus metrics on
    #[arg(long)]
    metrics_port: Option<u16>,

    /// Sidechain withdrawal transaction hashes to relay
    #[arg(required = true)]
    tx_hashes: Vec<B256>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Loading config: {}", args.config.display());
    let config = Config::from_file(&args.config)?;
    let network = config.network_config();

    let metrics = Metrics::new();
    if let Some(port) = args.metrics_port {
        crate::metrics::install_prometheus_exporter(port)?;
        info!("Prometheus metrics on port {}", port);
    }

    let relayer_signer = client::parse_signer(&config.relayer_private_key)?;
    let relayer_address = relayer_signer.address();
    info!("Relayer account: {}", relayer_address);

    // The relayer wallet doubles as the client's mainnet identity; it only
    // pays for bridge submissions, never touches union funds.
    let mainnet_provider =
        client::create_wallet_provider(&config.mainnet_rpc_url, relayer_signer)?;
    let sidechain_provider = client::create_provider(&config.sidechain_rpc_url)?;

    let client = DataUnionClient::new(
        mainnet_provider.clone(),
        sidechain_provider,
        network,
        relayer_address,
        relayer_address,
    );

    let mut failures = 0usize;
    for tx_hash in &args.tx_hashes {
        info!(tx_hash = %tx_hash, "Relaying sidechain transaction");
        metrics.record_transaction();

        let reports = match client
            .relay_tx_to_mainnet(*tx_hash, mainnet_provider.clone())
            .await
        {
            Ok(reports) => reports,
            Err(e) => {
                error!(tx_hash = %tx_hash, error = %e, "Could not relay transaction");
                failures += 1;
                continue;
            }
        };

        if reports.is_empty() {
            warn!(tx_hash = %tx_hash, "Transaction emitted no bridge messages");
        }

        for report in reports {
            match report.result {
                Ok(bridge::RelayOutcome::Relayed { tx_hash: mainnet_tx }) => {
                    info!(message_id = %report.message.id, mainnet_tx = %mainnet_tx, "Relayed");
                    metrics.record_relayed();
                }
                Ok(bridge::RelayOutcome::AlreadyHandled) => {
                    info!(message_id = %report.message.id, "Already handled, skipped");
                    metrics.record_skipped();
                }
                Ok(bridge::RelayOutcome::NotAffirmed) => {
                    warn!(
                        message_id = %report.message.id,
                        "Not yet affirmed; re-run once validators have signed"
                    );
                    metrics.record_not_affirmed();
                }
                Err(e) => {
                    error!(message_id = %report.message.id, error = %e, "Relay failed");
                    metrics.record_failed();
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        eyre::bail!("{} relay operation(s) failed", failures);
    }
    Ok(())
}
