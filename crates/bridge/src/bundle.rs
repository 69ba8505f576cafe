//! Signature bundle assembly.
//!
//! The mainnet bridge's verification entry point wants all collected
//! signatures in one blob, components grouped by kind rather than
//! interleaved per signature:
//!
//! ```text
//! [count: 1 byte][count × v][count × 32-byte r][count × 32-byte s]
//! ```
//!
//! total length `1 + 65 × count`. This layout is dictated by the bridge
//! contract and must match bit-for-bit.

use crate::{chain::HomeBridge, BridgeError};
use alloy_primitives::{Bytes, B256, U256};

/// A single byte holds the count, so a bundle can carry at most 255
/// signatures.
pub const MAX_SIGNATURES: usize = 255;

/// Each collected signature is a 65-byte r||s||v encoding.
pub const SIGNATURE_LEN: usize = 65;

/// Fetch the first `count` collected signatures for a message hash.
pub async fn collect_signatures<H: HomeBridge>(
    bridge: &H,
    hash: B256,
    count: u64,
) -> Result<Vec<Bytes>, BridgeError> {
    let mut signatures = Vec::with_capacity(count as usize);
    for index in 0..count {
        signatures.push(bridge.signature(hash, U256::from(index)).await?);
    }
    Ok(signatures)
}

/// Assemble 65-byte r||s||v signatures into the bridge's grouped layout.
pub fn assemble_signature_bundle(signatures: &[Bytes]) -> Result<Vec<u8>, BridgeError> {
    let count = signatures.len();
    if count > MAX_SIGNATURES {
        return Err(BridgeError::InvalidArgument(format!(
            "cannot bundle {} signatures, limit is {}",
            count, MAX_SIGNATURES
        )));
    }

    let mut bundle = vec![0u8; 1 + SIGNATURE_LEN * count];
    bundle[0] = count as u8;

    for (i, signature) in signatures.iter().enumerate() {
        if signature.len() != SIGNATURE_LEN {
            return Err(BridgeError::InvalidArgument(format!(
                "signature {} is {} bytes, expected {}",
                i,
                signature.len(),
                SIGNATURE_LEN
            )));
        }

        let (r, rest) = signature.split_at(32);
        let (s, v) = rest.split_at(32);

        bundle[1 + i] = v[0];
        bundle[1 + count + i * 32..1 + count + (i + 1) * 32].copy_from_slice(r);
        bundle[1 + count * 33 + i * 32..1 + count * 33 + (i + 1) * 32].copy_from_slice(s);
    }

    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked_signature(marker: u8) -> Bytes {
        let mut sig = [0u8; SIGNATURE_LEN];
        sig[..32].copy_from_slice(&[marker; 32]); // r
        sig[32..64].copy_from_slice(&[marker | 0x80; 32]); // s
        sig[64] = 27 + (marker % 2); // v
        Bytes::from(sig.to_vec())
    }

    #[test]
    fn bundle_length_is_count_dependent() {
        for count in [0usize, 1, 3, 255] {
            let signatures: Vec<Bytes> =
                (0..count).map(|i| marked_signature(i as u8)).collect();
            let bundle = assemble_signature_bundle(&signatures).expect("within limit");
            assert_eq!(bundle.len(), 1 + SIGNATURE_LEN * count);
            assert_eq!(bundle[0] as usize, count);
        }
    }

    #[test]
    fn too_many_signatures_is_rejected_up_front() {
        let signatures: Vec<Bytes> = (0..256).map(|i| marked_signature(i as u8)).collect();
        let result = assemble_signature_bundle(&signatures);
        assert!(matches!(result, Err(BridgeError::InvalidArgument(_))));
    }

    #[test]
    fn components_are_grouped_by_kind() {
        let signatures = vec![marked_signature(0x01), marked_signature(0x02)];
        let bundle = assemble_signature_bundle(&signatures).expect("within limit");

        assert_eq!(bundle[0], 2);
        // v section
        assert_eq!(bundle[1], 27 + 1);
        assert_eq!(bundle[2], 27);
        // r section
        assert_eq!(&bundle[3..35], &[0x01; 32]);
        assert_eq!(&bundle[35..67], &[0x02; 32]);
        // s section
        assert_eq!(&bundle[67..99], &[0x81; 32]);
        assert_eq!(&bundle[99..131], &[0x82; 32]);
    }

    #[test]
    fn truncated_signature_is_rejected() {
        let signatures = vec![Bytes::from(vec![0u8; 64])];
        let result = assemble_signature_bundle(&signatures);
        assert!(matches!(result, Err(BridgeError::InvalidArgument(_))));
    }
}
