//! Affirmation quorum tracking on the sidechain bridge.

use crate::{chain::HomeBridge, BridgeError};
use alloy_primitives::{B256, U256};
use poller::WaitError;
use std::time::Duration;
use tracing::debug;

/// The sidechain bridge packs a "collection complete" flag into the
/// high-order bit of the signature counter. The flag, not the raw count,
/// is what says the counter is final; clear it before comparing against
/// the threshold.
pub const COLLECTION_COMPLETE_BIT: usize = 255;

/// Interpret a raw counter value against the required threshold.
///
/// Returns the cleared signature count once the completion bit is set and
/// the count has reached quorum, `None` otherwise.
pub fn affirmed_count(raw_count: U256, required: U256) -> Option<U256> {
    let complete = raw_count.bit(COLLECTION_COMPLETE_BIT);
    let count = raw_count & !(U256::from(1u8) << COLLECTION_COMPLETE_BIT);

    if complete && count >= required {
        Some(count)
    } else {
        None
    }
}

/// Poll the sidechain bridge until a quorum of affirmations exists for
/// `hash`, or `timeout` elapses.
///
/// `Ok(None)` means "not yet affirmed" — an expected outcome the caller may
/// retry later, not an error. Chain-call failures propagate immediately.
/// A zero `timeout` checks exactly once.
pub async fn wait_for_affirmations<H: HomeBridge>(
    bridge: &H,
    hash: B256,
    interval: Duration,
    timeout: Duration,
) -> Result<Option<u64>, BridgeError> {
    let result = poller::wait_for(
        || async {
            let required = bridge.required_signatures().await?;
            let raw = bridge.signed_message_count(hash).await?;

            debug!(
                message_hash = %hash,
                raw_count = %raw,
                required = %required,
                "Probed bridge affirmations"
            );

            match affirmed_count(raw, required) {
                Some(count) => {
                    let count = u64::try_from(count).map_err(|_| {
                        BridgeError::InvalidArgument(format!(
                            "affirmation count {} is not a sane signature count",
                            count
                        ))
                    })?;
                    Ok(Some(count))
                }
                None => Ok(None),
            }
        },
        interval,
        timeout,
    )
    .await;

    match result {
        Ok(count) => Ok(Some(count)),
        Err(WaitError::Timeout(_)) => Ok(None),
        Err(WaitError::Inner(e)) => Err(e),
    }
}
