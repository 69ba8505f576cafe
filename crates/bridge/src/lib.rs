//! Bridge relay: moving affirmed sidechain messages to the mainnet chain.
//!
//! A sidechain withdrawal emits a "signature requested" bridge event.
//! Validators affirm the message on the sidechain bridge; once a quorum of
//! signatures exists, anyone can assemble the signature bundle and submit
//! it to the mainnet bridge, which verifies and executes the message.
//!
//! The relay is idempotent: mainnet bridge state is the only source of
//! truth for "already handled", so re-running a relay for the same
//! transaction is always safe.

pub mod affirm;
pub mod bundle;
pub mod chain;
pub mod extract;
pub mod relay;
pub mod types;

pub use affirm::{wait_for_affirmations, COLLECTION_COMPLETE_BIT};
pub use chain::{AmbForeign, AmbHome, ForeignBridge, HomeBridge};
pub use relay::{BridgeRelay, MessageReport, RelayOutcome};
pub use types::BridgeMessage;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// RPC/transport failure or contract revert on a read or write
    #[error("chain call failed: {0}")]
    ChainCall(String),

    /// Rejected before any network call
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl BridgeError {
    pub(crate) fn chain(e: impl std::fmt::Display) -> Self {
        Self::ChainCall(e.to_string())
    }
}
