use crate::{Balance, BalanceError, BalanceQuery, Monitor};
use alloy_primitives::Address;
use alloy_provider::Provider;
use binding::token::IERC20;
use tracing::debug;

// Balance monitor implementation.
pub struct BalanceMonitor<P> {
    provider: P,
}

impl<P> BalanceMonitor<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    async fn query_native(&self, address: Address) -> Result<Balance, BalanceError> {
        debug!("Querying native balance: address={}", address);

        let balance = self
            .provider
            .get_balance(address)
            .await
            .map_err(BalanceError::chain)?;

        Ok(Balance {
            holder: address,
            asset: Address::ZERO,
            amount: balance,
        })
    }

    async fn query_erc20(&self, token: Address, holder: Address) -> Result<Balance, BalanceError> {
        debug!("Querying erc20 {} balance: address={}", token, holder);

        let contract = IERC20::new(token, &self.provider);
        let amount = contract
            .balanceOf(holder)
            .call()
            .await
            .map_err(BalanceError::chain)?;

        Ok(Balance {
            holder,
            asset: token,
            amount,
        })
    }
}

impl<P> Monitor for BalanceMonitor<P>
where
    P: Provider + Clone,
{
    async fn query_balance(&self, query: BalanceQuery) -> Result<Balance, BalanceError> {
        match query {
            BalanceQuery::Erc20 { token, holder } => self.query_erc20(token, holder).await,
            BalanceQuery::Native { address } => self.query_native(address).await,
        }
    }
}
