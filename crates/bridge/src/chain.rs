//! Seams between the relay logic and the two bridge contracts.
//!
//! The relay only needs a handful of reads on the sidechain bridge and one
//! guarded write on the mainnet bridge, so those capabilities are traits:
//! production code wires them to the AMB bindings, tests wire them to
//! in-memory fakes.

use crate::BridgeError;
use alloy_primitives::{Address, Bytes, TxHash, B256, U256};
use alloy_provider::Provider;
use binding::amb::{IForeignAMB, IHomeAMB};
use std::future::Future;

/// Sidechain (home) bridge: where affirmations are collected.
pub trait HomeBridge: Send + Sync {
    /// Validator quorum required for relaying.
    fn required_signatures(&self) -> impl Future<Output = Result<U256, BridgeError>> + Send;

    /// Raw signature counter for a message hash, completion bit included.
    fn signed_message_count(
        &self,
        hash: B256,
    ) -> impl Future<Output = Result<U256, BridgeError>> + Send;

    /// One collected 65-byte signature.
    fn signature(
        &self,
        hash: B256,
        index: U256,
    ) -> impl Future<Output = Result<Bytes, BridgeError>> + Send;

    /// The original encoded payload for a message hash.
    fn message(&self, hash: B256) -> impl Future<Output = Result<Bytes, BridgeError>> + Send;
}

/// Mainnet (foreign) bridge: where the signature bundle is submitted.
pub trait ForeignBridge: Send + Sync {
    /// True if the message id was already executed successfully.
    fn is_relayed(&self, id: B256) -> impl Future<Output = Result<bool, BridgeError>> + Send;

    /// Sender recorded for a failed execution of this id, zero if none.
    fn failed_message_sender(
        &self,
        id: B256,
    ) -> impl Future<Output = Result<Address, BridgeError>> + Send;

    /// Submit (payload, signature bundle) for verification and execution.
    fn execute_signatures(
        &self,
        message: Bytes,
        signatures: Bytes,
    ) -> impl Future<Output = Result<TxHash, BridgeError>> + Send;
}

/// [`HomeBridge`] backed by a sidechain provider.
pub struct AmbHome<P> {
    provider: P,
    address: Address,
}

impl<P> AmbHome<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, address: Address) -> Self {
        Self { provider, address }
    }
}

impl<P> HomeBridge for AmbHome<P>
where
    P: Provider + Clone,
{
    async fn required_signatures(&self) -> Result<U256, BridgeError> {
        IHomeAMB::new(self.address, &self.provider)
            .requiredSignatures()
            .call()
            .await
            .map_err(BridgeError::chain)
    }

    async fn signed_message_count(&self, hash: B256) -> Result<U256, BridgeError> {
        IHomeAMB::new(self.address, &self.provider)
            .numMessagesSigned(hash)
            .call()
            .await
            .map_err(BridgeError::chain)
    }

    async fn signature(&self, hash: B256, index: U256) -> Result<Bytes, BridgeError> {
        IHomeAMB::new(self.address, &self.provider)
            .signature(hash, index)
            .call()
            .await
            .map_err(BridgeError::chain)
    }

    async fn message(&self, hash: B256) -> Result<Bytes, BridgeError> {
        IHomeAMB::new(self.address, &self.provider)
            .message(hash)
            .call()
            .await
            .map_err(BridgeError::chain)
    }
}

/// [`ForeignBridge`] backed by a wallet-carrying mainnet provider.
///
/// The provider's wallet is the relaying credential; it may differ from
/// whoever originated the withdrawal.
pub struct AmbForeign<P> {
    provider: P,
    address: Address,
}

impl<P> AmbForeign<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, address: Address) -> Self {
        Self { provider, address }
    }
}

impl<P> ForeignBridge for AmbForeign<P>
where
    P: Provider + Clone,
{
    async fn is_relayed(&self, id: B256) -> Result<bool, BridgeError> {
        IForeignAMB::new(self.address, &self.provider)
            .messageCallStatus(id)
            .call()
            .await
            .map_err(BridgeError::chain)
    }

    async fn failed_message_sender(&self, id: B256) -> Result<Address, BridgeError> {
        IForeignAMB::new(self.address, &self.provider)
            .failedMessageSender(id)
            .call()
            .await
            .map_err(BridgeError::chain)
    }

    async fn execute_signatures(
        &self,
        message: Bytes,
        signatures: Bytes,
    ) -> Result<TxHash, BridgeError> {
        let contract = IForeignAMB::new(self.address, &self.provider);

        let pending = contract
            .executeSignatures(message, signatures)
            .send()
            .await
            .map_err(BridgeError::chain)?;
        let receipt = pending.get_receipt().await.map_err(BridgeError::chain)?;

        if !receipt.status() {
            return Err(BridgeError::ChainCall(format!(
                "executeSignatures reverted in tx {}",
                receipt.transaction_hash
            )));
        }

        Ok(receipt.transaction_hash)
    }
}
