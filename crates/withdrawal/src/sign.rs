//! Signing and verification of withdrawal messages.
//!
//! Signatures use the standard prefixed personal-message scheme (EIP-191),
//! so the sidechain contract can recover the member's address from the
//! signature without any key material leaving the client.

use crate::{
    encode::encode_request,
    types::{SignedWithdrawalRequest, WithdrawalRequest},
    WithdrawalError,
};
use alloy_primitives::{Address, Bytes, Signature};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

/// Sign a withdrawal request with the member's key.
///
/// The signer must be the member the request was built for; anything else
/// would produce a signature the contract attributes to the wrong address.
pub fn sign_request(
    request: WithdrawalRequest,
    signer: &PrivateKeySigner,
) -> Result<SignedWithdrawalRequest, WithdrawalError> {
    if signer.address() != request.from {
        return Err(WithdrawalError::InvalidArgument(format!(
            "signer {} is not the withdrawing member {}",
            signer.address(),
            request.from
        )));
    }

    let message = encode_request(&request);
    let signature = signer.sign_message_sync(&message)?;

    Ok(SignedWithdrawalRequest {
        request,
        signature: Bytes::from(signature.as_bytes().to_vec()),
    })
}

/// Recover the address that signed `message` under the prefixed
/// personal-message scheme.
///
/// This mirrors the contract's verification and is what tests (and mocks)
/// use to decide whether a withdrawal authorization is valid.
pub fn recover_signer(message: &[u8], signature: &[u8]) -> Result<Address, WithdrawalError> {
    let signature = Signature::try_from(signature)
        .map_err(|e| WithdrawalError::InvalidArgument(format!("malformed signature: {}", e)))?;

    signature
        .recover_address_from_msg(message)
        .map_err(|e| WithdrawalError::InvalidArgument(format!("unrecoverable signature: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn member_signer() -> PrivateKeySigner {
        // anvil dev key 1
        "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d"
            .parse()
            .expect("valid key")
    }

    fn request_for(signer: &PrivateKeySigner) -> WithdrawalRequest {
        WithdrawalRequest {
            from: signer.address(),
            to: Address::repeat_byte(0x22),
            amount: U256::from(5_000u64),
            sidechain_contract: Address::repeat_byte(0x33),
            prior_withdrawn: U256::from(100u64),
        }
    }

    #[test]
    fn signature_recovers_to_member() {
        let signer = member_signer();
        let signed = sign_request(request_for(&signer), &signer).expect("signing works");

        assert_eq!(signed.signature.len(), 65);
        // v must be in ecrecover form
        assert!(matches!(signed.signature[64], 27 | 28));

        let message = encode_request(&signed.request);
        let recovered = recover_signer(&message, &signed.signature).expect("recoverable");
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn stale_withdrawn_counter_invalidates_signature() {
        let signer = member_signer();
        let signed = sign_request(request_for(&signer), &signer).expect("signing works");

        // the counter moved after signing: a withdrawal went through
        let mut current = signed.request.clone();
        current.prior_withdrawn = U256::from(5_100u64);

        let recovered =
            recover_signer(&encode_request(&current), &signed.signature).expect("recoverable");
        assert_ne!(recovered, signer.address(), "replayed signature must not verify");
    }

    #[test]
    fn rejects_signer_other_than_member() {
        let signer = member_signer();
        let mut request = request_for(&signer);
        request.from = Address::repeat_byte(0x99);

        let result = sign_request(request, &signer);
        assert!(matches!(result, Err(WithdrawalError::InvalidArgument(_))));
    }
}
