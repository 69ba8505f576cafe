//! The relay state machine: observed → affirmed → relayed, with
//! already-handled and not-yet-affirmed short circuits.

use crate::{
    affirm::wait_for_affirmations,
    bundle::{assemble_signature_bundle, collect_signatures},
    chain::{ForeignBridge, HomeBridge},
    extract::extract_from_logs,
    types::BridgeMessage,
    BridgeError,
};
use alloy_primitives::{Address, Bytes, TxHash};
use alloy_rpc_types_eth::{Log, TransactionReceipt};
use std::time::Duration;
use tracing::{info, warn};

/// Terminal state of one relay attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Submitted and accepted by the mainnet bridge.
    Relayed { tx_hash: TxHash },
    /// The mainnet bridge had already executed (or executed-and-failed)
    /// this message id; nothing was submitted.
    AlreadyHandled,
    /// No affirmation quorum within the poll timeout. Expected while
    /// validators are still signing; retry later.
    NotAffirmed,
}

/// Per-message result of a relay pass over a receipt.
#[derive(Debug)]
pub struct MessageReport {
    pub message: BridgeMessage,
    pub result: Result<RelayOutcome, BridgeError>,
}

/// Relays bridge messages from the sidechain to the mainnet chain.
pub struct BridgeRelay<H, F> {
    home: H,
    foreign: F,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl<H, F> BridgeRelay<H, F>
where
    H: HomeBridge,
    F: ForeignBridge,
{
    pub const fn new(home: H, foreign: F, poll_interval: Duration, poll_timeout: Duration) -> Self {
        Self {
            home,
            foreign,
            poll_interval,
            poll_timeout,
        }
    }

    pub const fn home(&self) -> &H {
        &self.home
    }

    pub const fn foreign(&self) -> &F {
        &self.foreign
    }

    /// Relay every bridge message a sidechain transaction emitted.
    ///
    /// Messages are processed independently and in order; a failure or skip
    /// on one does not abort the rest. The per-message reports carry both
    /// outcomes and errors.
    pub async fn relay_receipt(&self, receipt: &TransactionReceipt) -> Vec<MessageReport> {
        let reports = self.relay_logs(receipt.logs()).await;
        info!(
            tx_hash = %receipt.transaction_hash,
            count = reports.len(),
            "Processed bridge messages from receipt"
        );
        reports
    }

    /// Same as [`Self::relay_receipt`], over raw log entries.
    pub async fn relay_logs(&self, logs: &[Log]) -> Vec<MessageReport> {
        let messages = extract_from_logs(logs);

        let mut reports = Vec::with_capacity(messages.len());
        for message in messages {
            let result = self.relay_message(&message).await;
            if let Err(e) = &result {
                warn!(message_id = %message.id, error = %e, "Relay failed");
            }
            reports.push(MessageReport { message, result });
        }
        reports
    }

    /// Drive a single message through the relay state machine.
    ///
    /// Safe to re-invoke for the same message: the duplicate guard makes a
    /// second pass a no-op once the first submission landed.
    pub async fn relay_message(
        &self,
        message: &BridgeMessage,
    ) -> Result<RelayOutcome, BridgeError> {
        // Duplicate guard: mainnet state decides, never local bookkeeping.
        if self.foreign.is_relayed(message.id).await? {
            warn!(message_id = %message.id, "Mainnet bridge already relayed message, skipping");
            return Ok(RelayOutcome::AlreadyHandled);
        }
        if self.foreign.failed_message_sender(message.id).await? != Address::ZERO {
            warn!(
                message_id = %message.id,
                "Mainnet bridge already recorded a failed execution, skipping"
            );
            return Ok(RelayOutcome::AlreadyHandled);
        }

        let Some(count) =
            wait_for_affirmations(&self.home, message.hash, self.poll_interval, self.poll_timeout)
                .await?
        else {
            warn!(
                message_id = %message.id,
                message_hash = %message.hash,
                "No affirmation quorum within timeout"
            );
            return Ok(RelayOutcome::NotAffirmed);
        };

        let signatures = collect_signatures(&self.home, message.hash, count).await?;
        let bundle = assemble_signature_bundle(&signatures)?;

        // Submit the canonical payload as stored by the bridge, not the
        // bytes we happened to see in the event log.
        let payload = self.home.message(message.hash).await?;

        info!(
            message_id = %message.id,
            signatures = count,
            "Submitting signature bundle to mainnet bridge"
        );
        let tx_hash = self
            .foreign
            .execute_signatures(payload, Bytes::from(bundle))
            .await?;

        info!(message_id = %message.id, tx_hash = %tx_hash, "Message relayed");
        Ok(RelayOutcome::Relayed { tx_hash })
    }
}
