//! Withdrawal authorization.
//!
//! A withdrawal from the sidechain contract is authorized by a signature
//! over a canonical byte message binding the recipient, the amount, the
//! contract, and the member's cumulative-withdrawn counter. Binding the
//! counter makes every signature single-use: the moment any withdrawal for
//! that member succeeds, the counter moves and all outstanding signatures
//! stop verifying.

pub mod authorize;
pub mod encode;
pub mod sign;
pub mod types;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WithdrawalError {
    /// RPC/transport failure or contract revert
    #[error("chain call failed: {0}")]
    ChainCall(String),

    /// Rejected before any network call
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Producing the recoverable signature failed
    #[error(transparent)]
    Signer(#[from] alloy_signer::Error),
}

impl WithdrawalError {
    pub(crate) fn chain(e: impl std::fmt::Display) -> Self {
        Self::ChainCall(e.to_string())
    }
}
