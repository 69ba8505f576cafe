//! Canonical withdrawal message encoding.
//!
//! The sidechain contract reconstructs this exact byte string when checking
//! a withdrawal signature, so the layout is wire-exact:
//!
//! ```text
//! to (20) ++ amount (32, big-endian) ++ sidechain contract (20) ++ prior withdrawn (32, big-endian)
//! ```
//!
//! Addresses are the low 20 bytes of their 32-byte ABI encoding; there is no
//! padding beyond each field's natural width.

use crate::types::WithdrawalRequest;

/// Total length of the canonical withdrawal message.
pub const WITHDRAWAL_MESSAGE_LEN: usize = 104;

/// Serialize a withdrawal request into its canonical signing message.
pub fn encode_request(request: &WithdrawalRequest) -> [u8; WITHDRAWAL_MESSAGE_LEN] {
    let mut message = [0u8; WITHDRAWAL_MESSAGE_LEN];

    message[0..20].copy_from_slice(request.to.as_slice());
    message[20..52].copy_from_slice(&request.amount.to_be_bytes::<32>());
    message[52..72].copy_from_slice(request.sidechain_contract.as_slice());
    message[72..104].copy_from_slice(&request.prior_withdrawn.to_be_bytes::<32>());

    message
}
