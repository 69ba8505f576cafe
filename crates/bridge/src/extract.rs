//! Extraction of bridge messages from sidechain transaction receipts.

use crate::types::BridgeMessage;
use alloy_primitives::keccak256;
use alloy_rpc_types_eth::{Log, TransactionReceipt};
use alloy_sol_types::SolEvent;
use binding::amb::IHomeAMB;

/// Scan a receipt for the home bridge's signature-request events.
pub fn extract_messages(receipt: &TransactionReceipt) -> Vec<BridgeMessage> {
    extract_from_logs(receipt.logs())
}

/// Scan raw log entries for the home bridge's signature-request events.
///
/// Non-matching logs (token transfers, withdrawal events, anything else the
/// transaction touched) are skipped; one transaction can carry any number
/// of bridge messages.
pub fn extract_from_logs(logs: &[Log]) -> Vec<BridgeMessage> {
    let mut messages = vec![];

    for log in logs {
        if let Ok(event) = IHomeAMB::UserRequestForSignature::decode_log(&log.inner) {
            let payload = event.data.encodedData.clone();
            messages.push(BridgeMessage {
                id: event.messageId,
                hash: keccak256(&payload),
                payload,
            });
        }
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, LogData, B256};

    fn signature_request_log(id: B256, payload: &[u8]) -> Log {
        let event = IHomeAMB::UserRequestForSignature {
            messageId: id,
            encodedData: Bytes::copy_from_slice(payload),
        };
        Log {
            inner: alloy_primitives::Log {
                address: Address::repeat_byte(0xab),
                data: event.encode_log_data(),
            },
            ..Default::default()
        }
    }

    fn unrelated_log() -> Log {
        Log {
            inner: alloy_primitives::Log {
                address: Address::repeat_byte(0x77),
                data: LogData::new_unchecked(
                    vec![B256::repeat_byte(0x01)],
                    Bytes::from(vec![0xde, 0xad]),
                ),
            },
            ..Default::default()
        }
    }

    #[test]
    fn extracts_all_bridge_messages_with_hashes() {
        let id_a = B256::repeat_byte(0x0a);
        let id_b = B256::repeat_byte(0x0b);
        let logs = vec![
            unrelated_log(),
            signature_request_log(id_a, b"payload-a"),
            unrelated_log(),
            signature_request_log(id_b, b"payload-b"),
        ];

        let messages = extract_from_logs(&logs);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, id_a);
        assert_eq!(messages[0].hash, keccak256(b"payload-a"));
        assert_eq!(messages[0].payload, Bytes::from_static(b"payload-a"));
        assert_eq!(messages[1].id, id_b);
        assert_eq!(messages[1].hash, keccak256(b"payload-b"));
    }

    #[test]
    fn no_bridge_events_means_no_messages() {
        let messages = extract_from_logs(&[unrelated_log(), unrelated_log()]);
        assert!(messages.is_empty());
    }
}
