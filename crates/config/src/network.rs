//! Network configuration for the two chains a data union spans.
//!
//! The mainnet chain holds real token value; the sidechain does day-to-day
//! accounting. Everything else (tokens, bridge endpoints) is resolved from
//! the factory contracts at runtime, so only the factories are pinned here.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Mainnet-side configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainnetConfig {
    /// Chain ID
    pub chain_id: u64,
    /// DataUnionFactoryMainnet contract address
    pub factory: Address,
    /// Block time in seconds
    pub block_time_secs: u64,
}

impl MainnetConfig {
    /// Ethereum mainnet deployment.
    pub const fn mainnet() -> Self {
        Self {
            chain_id: 1,
            factory: address!("0x7d55f9981d4E10A193314E001b96f72FCc901e40"),
            block_time_secs: 12,
        }
    }
}

/// Sidechain-side configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidechainConfig {
    /// Chain ID
    pub chain_id: u64,
    /// DataUnionFactorySidechain contract address
    pub factory: Address,
    /// Block time in seconds
    pub block_time_secs: u64,
}

impl SidechainConfig {
    /// xDai sidechain deployment.
    pub const fn xdai() -> Self {
        Self {
            chain_id: 100,
            factory: address!("0x4A4c4759eb3b7ABee079f832850cD3D0dC48D927"),
            block_time_secs: 5,
        }
    }
}

/// Complete two-chain configuration for a data-union client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Mainnet chain configuration
    pub mainnet: MainnetConfig,
    /// Sidechain configuration
    pub sidechain: SidechainConfig,
    /// Seconds between bridge affirmation probes
    pub bridge_poll_interval_secs: u64,
    /// Seconds to wait for bridge affirmations before giving up
    pub bridge_poll_timeout_secs: u64,
}

impl NetworkConfig {
    /// Production configuration: Ethereum mainnet + xDai sidechain.
    pub const fn mainnet() -> Self {
        Self {
            mainnet: MainnetConfig::mainnet(),
            sidechain: SidechainConfig::xdai(),
            bridge_poll_interval_secs: 10,
            bridge_poll_timeout_secs: 600,
        }
    }

    pub const fn bridge_poll_interval(&self) -> Duration {
        Duration::from_secs(self.bridge_poll_interval_secs)
    }

    pub const fn bridge_poll_timeout(&self) -> Duration {
        Duration::from_secs(self.bridge_poll_timeout_secs)
    }
}

/// Builder for custom network configurations (private deployments,
/// testnets, local dev chains).
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    mainnet: MainnetConfig,
    sidechain: SidechainConfig,
    bridge_poll_interval_secs: u64,
    bridge_poll_timeout_secs: u64,
}

impl NetworkConfigBuilder {
    /// Start with production defaults.
    pub const fn mainnet() -> Self {
        Self {
            mainnet: MainnetConfig::mainnet(),
            sidechain: SidechainConfig::xdai(),
            bridge_poll_interval_secs: 10,
            bridge_poll_timeout_secs: 600,
        }
    }

    /// Override the mainnet factory address.
    pub const fn mainnet_factory(mut self, address: Address) -> Self {
        self.mainnet.factory = address;
        self
    }

    /// Override the mainnet chain id.
    pub const fn mainnet_chain_id(mut self, chain_id: u64) -> Self {
        self.mainnet.chain_id = chain_id;
        self
    }

    /// Override the sidechain factory address.
    pub const fn sidechain_factory(mut self, address: Address) -> Self {
        self.sidechain.factory = address;
        self
    }

    /// Override the sidechain chain id.
    pub const fn sidechain_chain_id(mut self, chain_id: u64) -> Self {
        self.sidechain.chain_id = chain_id;
        self
    }

    /// Override how often and how long to poll the bridge for affirmations.
    pub const fn bridge_poll(mut self, interval_secs: u64, timeout_secs: u64) -> Self {
        self.bridge_poll_interval_secs = interval_secs;
        self.bridge_poll_timeout_secs = timeout_secs;
        self
    }

    /// Build the network configuration.
    pub const fn build(self) -> NetworkConfig {
        NetworkConfig {
            mainnet: self.mainnet,
            sidechain: self.sidechain,
            bridge_poll_interval_secs: self.bridge_poll_interval_secs,
            bridge_poll_timeout_secs: self.bridge_poll_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_config() {
        let config = NetworkConfig::mainnet();
        assert_eq!(config.mainnet.chain_id, 1);
        assert_eq!(config.sidechain.chain_id, 100);
        assert_eq!(config.bridge_poll_interval(), Duration::from_secs(10));
        assert_eq!(config.bridge_poll_timeout(), Duration::from_secs(600));
    }

    #[test]
    fn test_custom_config_builder() {
        let custom_factory = address!("1111111111111111111111111111111111111111");

        let config = NetworkConfigBuilder::mainnet()
            .sidechain_factory(custom_factory)
            .sidechain_chain_id(8995)
            .bridge_poll(2, 60)
            .build();

        assert_eq!(config.sidechain.factory, custom_factory);
        assert_eq!(config.sidechain.chain_id, 8995);
        assert_eq!(config.mainnet.chain_id, 1);
        assert_eq!(config.bridge_poll_timeout_secs, 60);
    }
}
