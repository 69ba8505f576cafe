use ::config::{NetworkConfig, NetworkConfigBuilder};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level relayer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mainnet RPC endpoint url
    pub mainnet_rpc_url: String,

    /// Sidechain RPC endpoint url
    pub sidechain_rpc_url: String,

    /// Private key paying for the mainnet bridge submissions
    pub relayer_private_key: String,

    /// Override for the mainnet data union factory
    #[serde(default)]
    pub mainnet_factory: Option<Address>,

    /// Override for the sidechain data union factory
    #[serde(default)]
    pub sidechain_factory: Option<Address>,

    /// Override for the affirmation poll interval, in seconds
    #[serde(default)]
    pub bridge_poll_interval_secs: Option<u64>,

    /// Override for the affirmation poll timeout, in seconds
    #[serde(default)]
    pub bridge_poll_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Production network presets with this file's overrides applied.
    pub fn network_config(&self) -> NetworkConfig {
        let mut builder = NetworkConfigBuilder::mainnet();
        if let Some(factory) = self.mainnet_factory {
            builder = builder.mainnet_factory(factory);
        }
        if let Some(factory) = self.sidechain_factory {
            builder = builder.sidechain_factory(factory);
        }
        let defaults = NetworkConfig::mainnet();
        builder = builder.bridge_poll(
            self.bridge_poll_interval_secs
                .unwrap_or(defaults.bridge_poll_interval_secs),
            self.bridge_poll_timeout_secs
                .unwrap_or(defaults.bridge_poll_timeout_secs),
        );
        builder.build()
    }
}
