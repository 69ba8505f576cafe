//! Data union client: deploy and operate revenue-sharing contract pairs
//! spanning a mainnet chain and an accounting sidechain.
//!
//! [`client::DataUnionClient`] talks to the factories (deploy/load unions,
//! bridge relaying, chain-level waits); [`handle::DataUnion`] operates one
//! particular union (earnings queries, membership, withdrawals).

pub mod client;
pub mod handle;

pub use client::DataUnionClient;
pub use handle::{DataUnion, MemberStatus};

use poller::WaitError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataUnionError {
    /// RPC/transport failure or contract revert on a read or write
    #[error("chain call failed: {0}")]
    ChainCall(String),

    /// Rejected before any network call
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A transaction, member or message that does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A wait elapsed without its condition becoming true. Recoverable:
    /// the caller may poll again later.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl DataUnionError {
    pub(crate) fn chain(e: impl std::fmt::Display) -> Self {
        Self::ChainCall(e.to_string())
    }

    /// True if the operation merely ran out of time rather than failing.
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl<E: Into<Self>> From<WaitError<E>> for DataUnionError {
    fn from(e: WaitError<E>) -> Self {
        match e {
            WaitError::Timeout(duration) => Self::Timeout(duration),
            WaitError::Inner(inner) => inner.into(),
        }
    }
}

impl From<bridge::BridgeError> for DataUnionError {
    fn from(e: bridge::BridgeError) -> Self {
        match e {
            bridge::BridgeError::ChainCall(msg) => Self::ChainCall(msg),
            bridge::BridgeError::InvalidArgument(msg) => Self::InvalidArgument(msg),
        }
    }
}

impl From<balance::BalanceError> for DataUnionError {
    fn from(e: balance::BalanceError) -> Self {
        match e {
            balance::BalanceError::ChainCall(msg) => Self::ChainCall(msg),
        }
    }
}

impl From<withdrawal::WithdrawalError> for DataUnionError {
    fn from(e: withdrawal::WithdrawalError) -> Self {
        match e {
            withdrawal::WithdrawalError::ChainCall(msg) => Self::ChainCall(msg),
            withdrawal::WithdrawalError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            withdrawal::WithdrawalError::Signer(e) => {
                Self::InvalidArgument(format!("signing failed: {}", e))
            }
        }
    }
}
