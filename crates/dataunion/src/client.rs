//! Factory-level client: deploy and load data unions, bridge relaying,
//! chain-level waits.

use crate::{handle::DataUnion, DataUnionError};
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionReceipt;
use balance::{monitor::BalanceMonitor, BalanceQuery};
use binding::factory::{IDataUnionFactoryMainnet, IDataUnionFactorySidechain};
use bridge::{AmbForeign, AmbHome, BridgeRelay, MessageReport};
use config::NetworkConfig;
use std::time::Duration;
use tracing::info;

/// Scale an admin fee fraction in [0, 1] to its 1e18-denominated on-chain
/// representation.
pub fn admin_fee_to_wei(fraction: f64) -> Result<U256, DataUnionError> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(DataUnionError::InvalidArgument(format!(
            "admin fee fraction must be between 0 and 1, got {}",
            fraction
        )));
    }
    Ok(U256::from((fraction * 1e18) as u128))
}

/// Client bound to one mainnet/sidechain pair of factories.
///
/// Both providers are expected to carry wallets (the admin credentials on
/// each chain); the account addresses are the corresponding transaction
/// senders.
pub struct DataUnionClient<MP, SP> {
    mainnet_provider: MP,
    sidechain_provider: SP,
    config: NetworkConfig,
    mainnet_account: Address,
    sidechain_account: Address,
}

impl<MP, SP> DataUnionClient<MP, SP>
where
    MP: Provider + Clone,
    SP: Provider + Clone,
{
    pub const fn new(
        mainnet_provider: MP,
        sidechain_provider: SP,
        config: NetworkConfig,
        mainnet_account: Address,
        sidechain_account: Address,
    ) -> Self {
        Self {
            mainnet_provider,
            sidechain_provider,
            config,
            mainnet_account,
            sidechain_account,
        }
    }

    pub const fn config(&self) -> &NetworkConfig {
        &self.config
    }

    // ─── deployment and loading ─────────────────────────────────────────

    /// Deploy a new data union through the mainnet factory.
    ///
    /// The returned handle's sidechain contract is deployed asynchronously
    /// by a bridge message; use
    /// [`DataUnion::wait_for_deployment`] before touching it.
    pub async fn deploy_data_union(
        &self,
        name: &str,
        admin: Address,
        admin_fee_fraction: f64,
        agents: Vec<Address>,
    ) -> Result<DataUnion<MP, SP>, DataUnionError> {
        let admin_fee = admin_fee_to_wei(admin_fee_fraction)?;

        let factory =
            IDataUnionFactoryMainnet::new(self.config.mainnet.factory, &self.mainnet_provider);
        let pending = factory
            .deployNewDataUnion(admin, admin_fee, agents, name.to_owned())
            .send()
            .await
            .map_err(DataUnionError::chain)?;
        let receipt = pending.get_receipt().await.map_err(DataUnionError::chain)?;

        info!(
            name = name,
            admin = %admin,
            tx_hash = %receipt.transaction_hash,
            "Deployed data union"
        );

        self.from_name(name).await
    }

    /// Load a union deployed by this client's account, by name.
    pub async fn from_name(&self, name: &str) -> Result<DataUnion<MP, SP>, DataUnionError> {
        let factory =
            IDataUnionFactoryMainnet::new(self.config.mainnet.factory, &self.mainnet_provider);
        let mainnet_address = factory
            .mainnetAddress(self.mainnet_account, name.to_owned())
            .call()
            .await
            .map_err(DataUnionError::chain)?;
        self.from_mainnet_address(mainnet_address).await
    }

    /// Load a union by its mainnet contract address, resolving the linked
    /// sidechain address through the factory.
    pub async fn from_mainnet_address(
        &self,
        mainnet_address: Address,
    ) -> Result<DataUnion<MP, SP>, DataUnionError> {
        let factory =
            IDataUnionFactoryMainnet::new(self.config.mainnet.factory, &self.mainnet_provider);
        let sidechain_address = factory
            .sidechainAddress(mainnet_address)
            .call()
            .await
            .map_err(DataUnionError::chain)?;

        Ok(DataUnion::new(
            self.mainnet_provider.clone(),
            self.sidechain_provider.clone(),
            mainnet_address,
            sidechain_address,
            self.sidechain_account,
        ))
    }

    // ─── factory views and admin setters ────────────────────────────────

    pub async fn mainnet_token_address(&self) -> Result<Address, DataUnionError> {
        IDataUnionFactoryMainnet::new(self.config.mainnet.factory, &self.mainnet_provider)
            .token()
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    pub async fn sidechain_token_address(&self) -> Result<Address, DataUnionError> {
        IDataUnionFactorySidechain::new(self.config.sidechain.factory, &self.sidechain_provider)
            .token()
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    async fn mainnet_amb_address(&self) -> Result<Address, DataUnionError> {
        IDataUnionFactoryMainnet::new(self.config.mainnet.factory, &self.mainnet_provider)
            .amb()
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    async fn sidechain_amb_address(&self) -> Result<Address, DataUnionError> {
        IDataUnionFactorySidechain::new(self.config.sidechain.factory, &self.sidechain_provider)
            .amb()
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    /// Set the native currency granted to newly deployed unions.
    pub async fn set_new_du_initial_eth(&self, amount_wei: U256) -> Result<(), DataUnionError> {
        let factory =
            IDataUnionFactorySidechain::new(self.config.sidechain.factory, &self.sidechain_provider);
        let pending = factory
            .setNewDUInitialEth(amount_wei)
            .send()
            .await
            .map_err(DataUnionError::chain)?;
        pending.get_receipt().await.map_err(DataUnionError::chain)?;
        Ok(())
    }

    /// Set the native currency granted to new union owners.
    pub async fn set_new_du_owner_initial_eth(
        &self,
        amount_wei: U256,
    ) -> Result<(), DataUnionError> {
        let factory =
            IDataUnionFactorySidechain::new(self.config.sidechain.factory, &self.sidechain_provider);
        let pending = factory
            .setNewDUOwnerInitialEth(amount_wei)
            .send()
            .await
            .map_err(DataUnionError::chain)?;
        pending.get_receipt().await.map_err(DataUnionError::chain)?;
        Ok(())
    }

    /// Set the native currency granted to newly added members.
    pub async fn set_new_member_initial_eth(
        &self,
        amount_wei: U256,
    ) -> Result<(), DataUnionError> {
        let factory =
            IDataUnionFactorySidechain::new(self.config.sidechain.factory, &self.sidechain_provider);
        let pending = factory
            .setNewMemberInitialEth(amount_wei)
            .send()
            .await
            .map_err(DataUnionError::chain)?;
        pending.get_receipt().await.map_err(DataUnionError::chain)?;
        Ok(())
    }

    // ─── chain-level waits ──────────────────────────────────────────────

    /// Poll mainnet until a transaction is mined, returning its receipt.
    pub async fn wait_for_mainnet_tx(
        &self,
        tx_hash: B256,
        interval: Duration,
        timeout: Duration,
    ) -> Result<TransactionReceipt, DataUnionError> {
        wait_for_tx(&self.mainnet_provider, tx_hash, interval, timeout).await
    }

    /// Poll the sidechain until a transaction is mined, returning its
    /// receipt.
    pub async fn wait_for_sidechain_tx(
        &self,
        tx_hash: B256,
        interval: Duration,
        timeout: Duration,
    ) -> Result<TransactionReceipt, DataUnionError> {
        wait_for_tx(&self.sidechain_provider, tx_hash, interval, timeout).await
    }

    /// Poll a mainnet token balance until it moves away from `initial`.
    pub async fn wait_for_mainnet_balance_change(
        &self,
        initial: U256,
        holder: Address,
        interval: Duration,
        timeout: Duration,
    ) -> Result<U256, DataUnionError> {
        let token = self.mainnet_token_address().await?;
        let monitor = BalanceMonitor::new(self.mainnet_provider.clone());
        Ok(balance::wait_for_balance_change(
            &monitor,
            BalanceQuery::Erc20 { token, holder },
            initial,
            interval,
            timeout,
        )
        .await?)
    }

    /// Poll a sidechain token balance until it moves away from `initial`.
    pub async fn wait_for_sidechain_balance_change(
        &self,
        initial: U256,
        holder: Address,
        interval: Duration,
        timeout: Duration,
    ) -> Result<U256, DataUnionError> {
        let token = self.sidechain_token_address().await?;
        let monitor = BalanceMonitor::new(self.sidechain_provider.clone());
        Ok(balance::wait_for_balance_change(
            &monitor,
            BalanceQuery::Erc20 { token, holder },
            initial,
            interval,
            timeout,
        )
        .await?)
    }

    // ─── bridge relaying ────────────────────────────────────────────────

    /// Wait until the sidechain bridge has a quorum of affirmations for a
    /// message hash. `Ok(None)` means "not yet" — retry later.
    pub async fn wait_for_affirmations(
        &self,
        message_hash: B256,
        interval: Duration,
        timeout: Duration,
    ) -> Result<Option<u64>, DataUnionError> {
        let home = AmbHome::new(self.sidechain_provider.clone(), self.sidechain_amb_address().await?);
        Ok(bridge::wait_for_affirmations(&home, message_hash, interval, timeout).await?)
    }

    /// Relay all bridge messages of a sidechain transaction to mainnet.
    ///
    /// `relayer_provider` is a wallet-carrying mainnet provider; the
    /// relaying credential may differ from this client's admin. Safe to
    /// re-invoke for the same transaction.
    pub async fn relay_tx_to_mainnet<P>(
        &self,
        tx_hash: B256,
        relayer_provider: P,
    ) -> Result<Vec<MessageReport>, DataUnionError>
    where
        P: Provider + Clone,
    {
        let receipt = self
            .sidechain_provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(DataUnionError::chain)?
            .ok_or_else(|| {
                DataUnionError::NotFound(format!(
                    "no sidechain transaction found for txhash {}",
                    tx_hash
                ))
            })?;

        self.relay_receipt_to_mainnet(&receipt, relayer_provider)
            .await
    }

    /// Relay all bridge messages of an already-fetched sidechain receipt.
    pub async fn relay_receipt_to_mainnet<P>(
        &self,
        receipt: &TransactionReceipt,
        relayer_provider: P,
    ) -> Result<Vec<MessageReport>, DataUnionError>
    where
        P: Provider + Clone,
    {
        let home = AmbHome::new(self.sidechain_provider.clone(), self.sidechain_amb_address().await?);
        let foreign = AmbForeign::new(relayer_provider, self.mainnet_amb_address().await?);
        let relay = BridgeRelay::new(
            home,
            foreign,
            self.config.bridge_poll_interval(),
            self.config.bridge_poll_timeout(),
        );

        Ok(relay.relay_receipt(receipt).await)
    }
}

/// Poll a provider for a transaction receipt until it appears.
async fn wait_for_tx<P: Provider + Clone>(
    provider: &P,
    tx_hash: B256,
    interval: Duration,
    timeout: Duration,
) -> Result<TransactionReceipt, DataUnionError> {
    let receipt = poller::wait_for(
        || async {
            provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(DataUnionError::chain)
        },
        interval,
        timeout,
    )
    .await?;
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_fee_is_validated_before_any_network_call() {
        assert!(matches!(
            admin_fee_to_wei(-0.1),
            Err(DataUnionError::InvalidArgument(_))
        ));
        assert!(matches!(
            admin_fee_to_wei(1.5),
            Err(DataUnionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn admin_fee_scales_to_wei() {
        assert_eq!(admin_fee_to_wei(0.0).unwrap(), U256::ZERO);
        assert_eq!(
            admin_fee_to_wei(1.0).unwrap(),
            U256::from(1_000_000_000_000_000_000u128)
        );
        assert_eq!(
            admin_fee_to_wei(0.25).unwrap(),
            U256::from(250_000_000_000_000_000u128)
        );
    }
}
