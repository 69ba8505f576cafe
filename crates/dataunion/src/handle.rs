//! Handle for one deployed data union.

use crate::DataUnionError;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionReceipt;
use alloy_signer_local::PrivateKeySigner;
use binding::union::{IDataUnionMainnet, IDataUnionSidechain};
use std::time::Duration;
use tracing::info;
use withdrawal::{authorize::WithdrawalAuthorizer, types::SignedWithdrawalRequest};

/// Membership status as stored by the sidechain contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    None,
    Active,
    Inactive,
}

impl MemberStatus {
    const fn from_contract(status: u8) -> Self {
        match status {
            1 => Self::Active,
            2 => Self::Inactive,
            _ => Self::None,
        }
    }
}

/// One data union: a mainnet contract holding value, linked to a sidechain
/// contract doing the accounting.
///
/// Immutable after construction; owns no chain state. Earnings queries and
/// membership changes go to the sidechain, `send_tokens_to_bridge` to
/// mainnet. Construct through
/// [`DataUnionClient`](crate::client::DataUnionClient).
pub struct DataUnion<MP, SP> {
    mainnet_provider: MP,
    sidechain_provider: SP,
    mainnet_address: Address,
    sidechain_address: Address,
    /// Address the sidechain provider's wallet submits transactions as;
    /// also the default withdrawal recipient.
    sidechain_account: Address,
}

impl<MP, SP> DataUnion<MP, SP>
where
    MP: Provider + Clone,
    SP: Provider + Clone,
{
    pub const fn new(
        mainnet_provider: MP,
        sidechain_provider: SP,
        mainnet_address: Address,
        sidechain_address: Address,
        sidechain_account: Address,
    ) -> Self {
        Self {
            mainnet_provider,
            sidechain_provider,
            mainnet_address,
            sidechain_address,
            sidechain_account,
        }
    }

    pub const fn mainnet_address(&self) -> Address {
        self.mainnet_address
    }

    pub const fn sidechain_address(&self) -> Address {
        self.sidechain_address
    }

    // ─── deployment ─────────────────────────────────────────────────────

    /// Wait until the sidechain contract has code at its address.
    ///
    /// The sidechain half is instantiated by a cross-chain message, so it
    /// appears some time after the mainnet factory call.
    pub async fn wait_for_deployment(
        &self,
        interval: Duration,
        timeout: Duration,
    ) -> Result<(), DataUnionError> {
        poller::wait_for(
            || async {
                let code = self
                    .sidechain_provider
                    .get_code_at(self.sidechain_address)
                    .await
                    .map_err(DataUnionError::chain)?;
                Ok::<_, DataUnionError>((!code.is_empty()).then_some(()))
            },
            interval,
            timeout,
        )
        .await?;
        Ok(())
    }

    /// One-shot deployment check.
    pub async fn is_deployed(&self) -> Result<bool, DataUnionError> {
        match self
            .wait_for_deployment(Duration::ZERO, Duration::ZERO)
            .await
        {
            Ok(()) => Ok(true),
            Err(e) if e.is_timeout() => Ok(false),
            Err(e) => Err(e),
        }
    }

    // ─── earnings and membership queries ────────────────────────────────

    pub async fn total_earnings(&self) -> Result<U256, DataUnionError> {
        IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider)
            .totalEarnings()
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    pub async fn total_earnings_withdrawn(&self) -> Result<U256, DataUnionError> {
        IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider)
            .totalEarningsWithdrawn()
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    pub async fn active_member_count(&self) -> Result<U256, DataUnionError> {
        IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider)
            .activeMemberCount()
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    pub async fn inactive_member_count(&self) -> Result<U256, DataUnionError> {
        IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider)
            .inactiveMemberCount()
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    pub async fn lifetime_member_earnings(&self) -> Result<U256, DataUnionError> {
        IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider)
            .lifetimeMemberEarnings()
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    pub async fn join_part_agent_count(&self) -> Result<U256, DataUnionError> {
        IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider)
            .joinPartAgentCount()
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    pub async fn earnings_of(&self, member: Address) -> Result<U256, DataUnionError> {
        IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider)
            .getEarnings(member)
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    /// The member's cumulative-withdrawn counter; the value withdrawal
    /// signatures bind to.
    pub async fn withdrawn_of(&self, member: Address) -> Result<U256, DataUnionError> {
        IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider)
            .getWithdrawn(member)
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    pub async fn withdrawable_earnings_of(
        &self,
        member: Address,
    ) -> Result<U256, DataUnionError> {
        IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider)
            .getWithdrawableEarnings(member)
            .call()
            .await
            .map_err(DataUnionError::chain)
    }

    pub async fn member_status(&self, member: Address) -> Result<MemberStatus, DataUnionError> {
        let data = IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider)
            .memberData(member)
            .call()
            .await
            .map_err(DataUnionError::chain)?;
        Ok(MemberStatus::from_contract(data.status))
    }

    pub async fn is_member_active(&self, member: Address) -> Result<bool, DataUnionError> {
        Ok(self.member_status(member).await? == MemberStatus::Active)
    }

    /// Poll total earnings until they differ from `initial`.
    ///
    /// Used to observe off-chain side effects (a revenue deposit, a bridge
    /// transfer) landing on-chain.
    pub async fn wait_for_earnings_change(
        &self,
        initial: U256,
        interval: Duration,
        timeout: Duration,
    ) -> Result<U256, DataUnionError> {
        let earnings = poller::wait_for(
            || async {
                let earnings = self.total_earnings().await?;
                Ok::<_, DataUnionError>((earnings != initial).then_some(earnings))
            },
            interval,
            timeout,
        )
        .await?;
        Ok(earnings)
    }

    // ─── membership changes ─────────────────────────────────────────────

    pub async fn add_join_part_agents(
        &self,
        agents: &[Address],
    ) -> Result<TransactionReceipt, DataUnionError> {
        let contract = IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider);
        let pending = contract
            .addJoinPartAgents(agents.to_vec())
            .send()
            .await
            .map_err(DataUnionError::chain)?;
        let receipt = confirmed(pending.get_receipt().await)?;
        info!(union = %self.sidechain_address, count = agents.len(), "Added join/part agents");
        Ok(receipt)
    }

    pub async fn remove_join_part_agents(
        &self,
        agents: &[Address],
    ) -> Result<TransactionReceipt, DataUnionError> {
        let contract = IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider);
        let pending = contract
            .removeJoinPartAgents(agents.to_vec())
            .send()
            .await
            .map_err(DataUnionError::chain)?;
        let receipt = confirmed(pending.get_receipt().await)?;
        info!(union = %self.sidechain_address, count = agents.len(), "Removed join/part agents");
        Ok(receipt)
    }

    pub async fn add_members(
        &self,
        members: &[Address],
    ) -> Result<TransactionReceipt, DataUnionError> {
        let contract = IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider);
        let pending = contract
            .addMembers(members.to_vec())
            .send()
            .await
            .map_err(DataUnionError::chain)?;
        let receipt = confirmed(pending.get_receipt().await)?;
        info!(union = %self.sidechain_address, count = members.len(), "Added members");
        Ok(receipt)
    }

    pub async fn part_members(
        &self,
        members: &[Address],
    ) -> Result<TransactionReceipt, DataUnionError> {
        let contract = IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider);
        let pending = contract
            .partMembers(members.to_vec())
            .send()
            .await
            .map_err(DataUnionError::chain)?;
        let receipt = confirmed(pending.get_receipt().await)?;
        info!(union = %self.sidechain_address, count = members.len(), "Parted members");
        Ok(receipt)
    }

    /// Flush accumulated mainnet revenue through the bridge to the
    /// sidechain, where it becomes withdrawable member earnings.
    pub async fn send_tokens_to_bridge(&self) -> Result<TransactionReceipt, DataUnionError> {
        let contract = IDataUnionMainnet::new(self.mainnet_address, &self.mainnet_provider);
        let pending = contract
            .sendTokensToBridge()
            .send()
            .await
            .map_err(DataUnionError::chain)?;
        let receipt = confirmed(pending.get_receipt().await)?;
        info!(
            union = %self.mainnet_address,
            tx_hash = %receipt.transaction_hash,
            "Sent tokens to bridge"
        );
        Ok(receipt)
    }

    // ─── withdrawals ────────────────────────────────────────────────────

    /// Withdraw a member's earnings to their own address. The transaction
    /// sender must be that member or the admin. Amount zero withdraws
    /// everything.
    pub async fn withdraw_member(
        &self,
        member: Address,
        amount: U256,
    ) -> Result<TransactionReceipt, DataUnionError> {
        let contract = IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider);
        let pending = if amount.is_zero() {
            contract
                .withdrawAll(member, true)
                .send()
                .await
                .map_err(DataUnionError::chain)?
        } else {
            contract
                .withdraw(member, amount, true)
                .send()
                .await
                .map_err(DataUnionError::chain)?
        };
        let receipt = confirmed(pending.get_receipt().await)?;
        info!(member = %member, amount = %amount, "Withdrew member earnings");
        Ok(receipt)
    }

    /// Withdraw the sender's own earnings to their own address.
    pub async fn withdraw_self(&self, amount: U256) -> Result<TransactionReceipt, DataUnionError> {
        self.withdraw_self_to(self.sidechain_account, amount).await
    }

    /// Withdraw the sender's own earnings to a chosen recipient.
    pub async fn withdraw_self_to(
        &self,
        to: Address,
        amount: U256,
    ) -> Result<TransactionReceipt, DataUnionError> {
        let contract = IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider);
        let pending = if amount.is_zero() {
            contract
                .withdrawAllTo(to, true)
                .send()
                .await
                .map_err(DataUnionError::chain)?
        } else {
            contract
                .withdrawTo(to, amount, true)
                .send()
                .await
                .map_err(DataUnionError::chain)?
        };
        let receipt = confirmed(pending.get_receipt().await)?;
        info!(to = %to, amount = %amount, "Withdrew own earnings");
        Ok(receipt)
    }

    /// Build and sign a withdrawal authorization for out-of-band
    /// submission, without submitting anything.
    pub async fn sign_withdrawal(
        &self,
        member_signer: &PrivateKeySigner,
        to: Address,
        amount: U256,
    ) -> Result<SignedWithdrawalRequest, DataUnionError> {
        let authorizer =
            WithdrawalAuthorizer::new(self.sidechain_provider.clone(), self.sidechain_address);
        Ok(authorizer.authorize(member_signer, to, amount).await?)
    }

    /// Relayed withdrawal: sign with the member's key, submit with this
    /// handle's credentials. Lets a member withdraw without paying
    /// sidechain gas themselves.
    pub async fn withdraw(
        &self,
        member_signer: &PrivateKeySigner,
        to: Address,
        amount: U256,
    ) -> Result<TransactionReceipt, DataUnionError> {
        let signed = self.sign_withdrawal(member_signer, to, amount).await?;
        self.withdraw_signed(&signed).await
    }

    /// Submit a previously produced withdrawal authorization.
    pub async fn withdraw_signed(
        &self,
        signed: &SignedWithdrawalRequest,
    ) -> Result<TransactionReceipt, DataUnionError> {
        let request = &signed.request;
        let contract = IDataUnionSidechain::new(self.sidechain_address, &self.sidechain_provider);
        let pending = if request.is_withdraw_all() {
            contract
                .withdrawAllToSigned(request.from, request.to, true, signed.signature.clone())
                .send()
                .await
                .map_err(DataUnionError::chain)?
        } else {
            contract
                .withdrawToSigned(
                    request.from,
                    request.to,
                    request.amount,
                    true,
                    signed.signature.clone(),
                )
                .send()
                .await
                .map_err(DataUnionError::chain)?
        };
        let receipt = confirmed(pending.get_receipt().await)?;
        info!(
            member = %request.from,
            to = %request.to,
            amount = %request.amount,
            tx_hash = %receipt.transaction_hash,
            "Submitted signed withdrawal"
        );
        Ok(receipt)
    }
}

/// Map a pending-transaction result into a confirmed, non-reverted receipt.
fn confirmed(
    result: Result<TransactionReceipt, impl std::fmt::Display>,
) -> Result<TransactionReceipt, DataUnionError> {
    let receipt = result.map_err(DataUnionError::chain)?;
    if !receipt.status() {
        return Err(DataUnionError::ChainCall(format!(
            "transaction {} reverted",
            receipt.transaction_hash
        )));
    }
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_status_mapping() {
        assert_eq!(MemberStatus::from_contract(0), MemberStatus::None);
        assert_eq!(MemberStatus::from_contract(1), MemberStatus::Active);
        assert_eq!(MemberStatus::from_contract(2), MemberStatus::Inactive);
        // anything unknown is treated as no membership
        assert_eq!(MemberStatus::from_contract(9), MemberStatus::None);
    }
}
