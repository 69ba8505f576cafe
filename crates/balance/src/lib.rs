//! Balance queries and balance-change waits.
//!
//! Token payouts land asynchronously (a bridge transfer, a withdrawal being
//! relayed), so besides point-in-time queries this crate can wait until a
//! balance moves away from a known baseline.

pub mod monitor;

use alloy_primitives::{Address, U256};
use poller::WaitError;
use serde::{Deserialize, Serialize};
use std::{future::Future, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BalanceError {
    /// RPC/transport failure or contract revert
    #[error("chain call failed: {0}")]
    ChainCall(String),
}

impl BalanceError {
    pub(crate) fn chain(e: impl std::fmt::Display) -> Self {
        Self::ChainCall(e.to_string())
    }
}

/// Represents a blockchain balance at a specific point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// The address holding the balance
    pub holder: Address,
    /// The asset address (zero address for native currency)
    pub asset: Address,
    /// The balance amount
    pub amount: U256,
}

/// Type of balance query to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceQuery {
    /// Query ERC20 token balance for an EOA or contract
    Erc20 {
        /// Token contract address
        token: Address,
        /// Holder address
        holder: Address,
    },
    /// Query native currency balance
    Native {
        /// Account address
        address: Address,
    },
}

/// Trait for monitoring balances on a blockchain.
pub trait Monitor: Send + Sync {
    /// Query a single balance.
    fn query_balance(
        &self,
        query: BalanceQuery,
    ) -> impl Future<Output = Result<Balance, BalanceError>> + Send;
}

/// Poll a balance until it differs from `initial`, returning the new value.
///
/// Times out with [`WaitError::Timeout`] if the balance never moves; query
/// failures propagate immediately.
pub async fn wait_for_balance_change<M: Monitor>(
    monitor: &M,
    query: BalanceQuery,
    initial: U256,
    interval: Duration,
    timeout: Duration,
) -> Result<U256, WaitError<BalanceError>> {
    poller::wait_for(
        || {
            let query = query.clone();
            async move {
                let balance = monitor.query_balance(query).await?;
                Ok(if balance.amount == initial {
                    None
                } else {
                    Some(balance.amount)
                })
            }
        },
        interval,
        timeout,
    )
    .await
}
