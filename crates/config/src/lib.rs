//! Configuration types for the data-union client.
//!
//! This crate provides:
//! - Network configurations (chain ids, factory addresses, block times)
//! - Bridge polling defaults
//! - A builder for custom deployments

pub mod network;

pub use network::{MainnetConfig, NetworkConfig, NetworkConfigBuilder, SidechainConfig};
