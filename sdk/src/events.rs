//! Event parsing from transaction logs
//!
//! Anchor emits events as base64 payloads in `Program data:` log lines:
//! an 8-byte event discriminator followed by the borsh-encoded fields.
//! This module parses `PaymentRecord` events — the protocol's canonical
//! payment audit trail — out of raw log output.

use anchor_lang::prelude::*;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TributaryError};
use crate::program_types::serde_big_array;

/// Event discriminator for `PaymentRecord`
/// (sha256("event:PaymentRecord")[..8], pinned from the deployed IDL)
pub const PAYMENT_RECORD_DISCRIMINATOR: [u8; 8] = [42, 100, 253, 124, 170, 186, 231, 186];

/// Log line prefix Anchor uses for emitted events
const PROGRAM_DATA_PREFIX: &str = "Program data: ";

/// One successful payment execution, as emitted on-chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct PaymentRecord {
    /// The policy that was executed
    pub payment_policy: Pubkey,
    /// The gateway the payment was routed through
    pub gateway: Pubkey,
    /// Gross amount charged, in token base units
    pub amount: u64,
    /// Unix timestamp of the execution
    pub timestamp: i64,
    /// Memo copied from the policy, zero-padded
    #[serde(with = "serde_big_array")]
    pub memo: [u8; 64],
    /// Sequence number of this payment within the policy
    pub record_id: u32,
}

impl PaymentRecord {
    /// Memo with the zero padding stripped
    #[must_use]
    pub fn memo_str(&self) -> String {
        let end = self.memo.iter().position(|&b| b == 0).unwrap_or(64);
        String::from_utf8_lossy(&self.memo[..end]).into_owned()
    }
}

/// Parse every `PaymentRecord` event out of a transaction's log lines
///
/// Lines that are not event payloads, carry other events, or fail to
/// decode are skipped — a log stream routinely interleaves CPI logs and
/// compute output with event data.
pub fn parse_payment_records(logs: &[String]) -> Vec<PaymentRecord> {
    logs.iter()
        .filter_map(|line| line.strip_prefix(PROGRAM_DATA_PREFIX))
        .filter_map(|payload| decode_payment_record(payload).ok())
        .collect()
}

/// Decode a single base64 event payload into a `PaymentRecord`
pub fn decode_payment_record(payload: &str) -> Result<PaymentRecord> {
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| TributaryError::ParseError(format!("invalid base64 event payload: {e}")))?;

    if bytes.len() < 8 {
        return Err(TributaryError::ParseError(
            "event payload shorter than a discriminator".to_string(),
        ));
    }

    if bytes[..8] != PAYMENT_RECORD_DISCRIMINATOR {
        return Err(TributaryError::ParseError(
            "not a PaymentRecord event".to_string(),
        ));
    }

    PaymentRecord::try_from_slice(&bytes[8..])
        .map_err(|e| TributaryError::ParseError(format!("malformed PaymentRecord: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program_types::string_to_bytes;

    fn sample_record() -> PaymentRecord {
        PaymentRecord {
            payment_policy: Pubkey::new_unique(),
            gateway: Pubkey::new_unique(),
            amount: 5_000_000,
            timestamp: 1_700_000_000,
            memo: string_to_bytes("premium plan"),
            record_id: 3,
        }
    }

    fn encode(record: &PaymentRecord) -> String {
        let mut bytes = PAYMENT_RECORD_DISCRIMINATOR.to_vec();
        AnchorSerialize::serialize(record, &mut bytes).unwrap();
        format!("Program data: {}", STANDARD.encode(bytes))
    }

    #[test]
    fn round_trips_through_log_lines() {
        let record = sample_record();
        let logs = vec![
            "Program TRibg8W8zmPHQqWtyAD1rEBRXEdyU13Mu6qX1Sg42tJ invoke [1]".to_string(),
            "Program log: Instruction: ExecutePayment".to_string(),
            encode(&record),
            "Program TRibg8W8zmPHQqWtyAD1rEBRXEdyU13Mu6qX1Sg42tJ success".to_string(),
        ];

        let parsed = parse_payment_records(&logs);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0], record);
        assert_eq!(parsed[0].memo_str(), "premium plan");
    }

    #[test]
    fn ignores_foreign_and_malformed_payloads() {
        let logs = vec![
            // Wrong discriminator.
            format!("Program data: {}", STANDARD.encode([0u8; 16])),
            // Not base64.
            "Program data: !!!not-base64!!!".to_string(),
            // Too short.
            format!("Program data: {}", STANDARD.encode([1u8, 2, 3])),
            // Unrelated log noise.
            "Program log: hello".to_string(),
        ];

        assert!(parse_payment_records(&logs).is_empty());
    }

    #[test]
    fn multiple_records_in_one_transaction() {
        let first = sample_record();
        let mut second = sample_record();
        second.record_id = 4;

        let logs = vec![encode(&first), encode(&second)];
        let parsed = parse_payment_records(&logs);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].record_id, 4);
    }

    #[test]
    fn truncated_body_is_an_error() {
        let record = sample_record();
        let mut bytes = PAYMENT_RECORD_DISCRIMINATOR.to_vec();
        AnchorSerialize::serialize(&record, &mut bytes).unwrap();
        bytes.truncate(bytes.len() - 4);

        let err = decode_payment_record(&STANDARD.encode(bytes)).unwrap_err();
        assert!(matches!(err, TributaryError::ParseError(_)));
    }
}
