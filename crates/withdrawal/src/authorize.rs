//! Chain-backed construction of withdrawal authorizations.

use crate::{
    sign::sign_request,
    types::{SignedWithdrawalRequest, WithdrawalRequest},
    WithdrawalError,
};
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_signer_local::PrivateKeySigner;
use binding::union::IDataUnionSidechain;
use tracing::debug;

/// Builds withdrawal requests against a live sidechain contract.
///
/// Every request embeds the member's cumulative-withdrawn counter as read
/// at build time, so requests must be rebuilt whenever a withdrawal may
/// have happened in between.
pub struct WithdrawalAuthorizer<P> {
    provider: P,
    contract: Address,
}

impl<P> WithdrawalAuthorizer<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, contract: Address) -> Self {
        Self { provider, contract }
    }

    /// Build an unsigned request for out-of-band signing.
    ///
    /// `amount` zero requests the member's entire balance and is passed
    /// through to the contract unchanged.
    pub async fn build_request(
        &self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<WithdrawalRequest, WithdrawalError> {
        let sidechain = IDataUnionSidechain::new(self.contract, &self.provider);
        let prior_withdrawn = sidechain
            .getWithdrawn(from)
            .call()
            .await
            .map_err(WithdrawalError::chain)?;

        debug!(
            member = %from,
            to = %to,
            amount = %amount,
            prior_withdrawn = %prior_withdrawn,
            "Built withdrawal request"
        );

        Ok(WithdrawalRequest {
            from,
            to,
            amount,
            sidechain_contract: self.contract,
            prior_withdrawn,
        })
    }

    /// Build and sign a request in one step, with `from` taken from the
    /// signer.
    pub async fn authorize(
        &self,
        signer: &PrivateKeySigner,
        to: Address,
        amount: U256,
    ) -> Result<SignedWithdrawalRequest, WithdrawalError> {
        let request = self.build_request(signer.address(), to, amount).await?;
        sign_request(request, signer)
    }
}
