use alloy_primitives::{Bytes, B256};

/// One outbound bridge message, as observed in a sidechain transaction's
/// event logs.
///
/// The bridge keys affirmations by `hash` (the content hash of the encoded
/// payload), while executed/failed bookkeeping on mainnet is keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeMessage {
    /// Bridge-assigned message id
    pub id: B256,
    /// keccak256 of the encoded payload; the affirmation key
    pub hash: B256,
    /// The opaque encoded payload as emitted
    pub payload: Bytes,
}
