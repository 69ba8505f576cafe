use alloy_primitives::{Address, Bytes, U256};

/// One withdrawal authorization, constructed per call and immediately
/// serialized for signing.
///
/// `prior_withdrawn` must be the member's cumulative-withdrawn counter as
/// read from the sidechain at construction time. A stale value produces a
/// signature the contract rejects — that is the replay protection working,
/// not a bug; rebuild the request instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalRequest {
    /// Member whose earnings are being withdrawn
    pub from: Address,
    /// Recipient of the tokens
    pub to: Address,
    /// Amount in wei; zero means "withdraw the entire available balance",
    /// resolved by the receiving contract, never client-side
    pub amount: U256,
    /// Sidechain data union contract the request is for
    pub sidechain_contract: Address,
    /// Member's cumulative-withdrawn counter at construction time
    pub prior_withdrawn: U256,
}

impl WithdrawalRequest {
    /// True if this request asks for the member's full balance.
    pub fn is_withdraw_all(&self) -> bool {
        self.amount.is_zero()
    }
}

/// A withdrawal request together with the member's signature over its
/// canonical encoding. Ready for submission by anyone, member or not.
#[derive(Debug, Clone)]
pub struct SignedWithdrawalRequest {
    pub request: WithdrawalRequest,
    /// 65-byte recoverable signature, r||s||v with v in {27, 28}
    pub signature: Bytes,
}
