//! End-to-end withdrawal authorization against an in-memory sidechain
//! contract: a signature is accepted exactly once, and replaying it after
//! the withdrawn counter has moved is rejected.

use alloy_primitives::{Address, U256};
use alloy_signer_local::PrivateKeySigner;
use std::collections::HashMap;
use withdrawal::{
    encode::encode_request,
    sign::{recover_signer, sign_request},
    types::{SignedWithdrawalRequest, WithdrawalRequest},
};

/// Minimal model of the sidechain contract's signed-withdrawal entry point:
/// recomputes the canonical message from live state and verifies the
/// recovered signer, exactly like the on-chain check.
struct MockSidechain {
    address: Address,
    earnings: HashMap<Address, U256>,
    withdrawn: HashMap<Address, U256>,
}

impl MockSidechain {
    fn new(address: Address) -> Self {
        Self {
            address,
            earnings: HashMap::new(),
            withdrawn: HashMap::new(),
        }
    }

    fn credit(&mut self, member: Address, amount: U256) {
        *self.earnings.entry(member).or_default() += amount;
    }

    fn withdrawn_of(&self, member: Address) -> U256 {
        self.withdrawn.get(&member).copied().unwrap_or_default()
    }

    /// `withdrawAllToSigned` / `withdrawToSigned`.
    fn withdraw_to_signed(&mut self, signed: &SignedWithdrawalRequest) -> Result<U256, String> {
        let from = signed.request.from;

        // The contract rebuilds the message from its own state, not from
        // what the submitter claims.
        let live = WithdrawalRequest {
            from,
            to: signed.request.to,
            amount: signed.request.amount,
            sidechain_contract: self.address,
            prior_withdrawn: self.withdrawn_of(from),
        };
        let message = encode_request(&live);

        let recovered =
            recover_signer(&message, &signed.signature).map_err(|e| e.to_string())?;
        if recovered != from {
            return Err(format!("signature does not verify for {}", from));
        }

        let available = self.earnings.get(&from).copied().unwrap_or_default()
            - self.withdrawn_of(from);
        let paid = if signed.request.amount.is_zero() {
            available
        } else if signed.request.amount <= available {
            signed.request.amount
        } else {
            return Err("insufficient withdrawable earnings".to_string());
        };

        *self.withdrawn.entry(from).or_default() += paid;
        Ok(paid)
    }
}

fn member_signer() -> PrivateKeySigner {
    // anvil dev key 2
    "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a"
        .parse()
        .expect("valid key")
}

#[test]
fn full_balance_withdrawal_is_single_use() {
    let contract = Address::repeat_byte(0xd0);
    let recipient = Address::repeat_byte(0xa1);
    let signer = member_signer();
    let member = signer.address();

    let mut sidechain = MockSidechain::new(contract);
    sidechain.credit(member, U256::from(500u64));

    // simulate earlier withdrawals: counter already at 100
    sidechain.withdrawn.insert(member, U256::from(100u64));

    // member authorizes withdrawing their entire remaining balance
    let request = WithdrawalRequest {
        from: member,
        to: recipient,
        amount: U256::ZERO,
        sidechain_contract: contract,
        prior_withdrawn: sidechain.withdrawn_of(member),
    };
    let signed = sign_request(request, &signer).expect("signing works");

    let paid = sidechain
        .withdraw_to_signed(&signed)
        .expect("fresh authorization is accepted");
    assert_eq!(paid, U256::from(400u64));
    assert_eq!(sidechain.withdrawn_of(member), U256::from(500u64));

    // identical resubmission: the counter moved, the old signature no
    // longer matches the message the contract reconstructs
    let err = sidechain
        .withdraw_to_signed(&signed)
        .expect_err("replay must be rejected");
    assert!(err.contains("does not verify"));
}

#[test]
fn partial_withdrawal_requires_fresh_counter() {
    let contract = Address::repeat_byte(0xd0);
    let signer = member_signer();
    let member = signer.address();

    let mut sidechain = MockSidechain::new(contract);
    sidechain.credit(member, U256::from(1_000u64));

    let first = sign_request(
        WithdrawalRequest {
            from: member,
            to: Address::repeat_byte(0xa1),
            amount: U256::from(300u64),
            sidechain_contract: contract,
            prior_withdrawn: U256::ZERO,
        },
        &signer,
    )
    .expect("signing works");

    assert_eq!(
        sidechain.withdraw_to_signed(&first).expect("accepted"),
        U256::from(300u64)
    );

    // a second request signed against the stale counter fails...
    let stale = sign_request(
        WithdrawalRequest {
            from: member,
            to: Address::repeat_byte(0xa2),
            amount: U256::from(300u64),
            sidechain_contract: contract,
            prior_withdrawn: U256::ZERO,
        },
        &signer,
    )
    .expect("signing works");
    sidechain
        .withdraw_to_signed(&stale)
        .expect_err("stale counter must be rejected");

    // ...and succeeds once rebuilt from the live counter
    let fresh = sign_request(
        WithdrawalRequest {
            from: member,
            to: Address::repeat_byte(0xa2),
            amount: U256::from(300u64),
            sidechain_contract: contract,
            prior_withdrawn: sidechain.withdrawn_of(member),
        },
        &signer,
    )
    .expect("signing works");
    assert_eq!(
        sidechain.withdraw_to_signed(&fresh).expect("accepted"),
        U256::from(300u64)
    );
}
