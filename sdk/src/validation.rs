//! Client-side validation utilities
//!
//! Duplicates of the program's precondition checks, run before a
//! transaction is submitted to save the round trip. These never replace
//! the on-chain checks; they just fail fast with the same typed errors
//! the program would return.

use anchor_client::solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::error::{Result, TributaryError};
use crate::program_types::{PaymentFrequency, PolicyType};

/// Upper bound for any fee expressed in basis points (100%)
pub const MAX_FEE_BPS: u16 = 10_000;

/// Floor for `PaymentFrequency::Custom` intervals (1 hour), mirroring
/// the program constant
pub const MIN_CUSTOM_INTERVAL_SECONDS: u64 = 3_600;

/// Validate a fee expressed in basis points
pub fn validate_fee_bps(fee_bps: u16) -> Result<()> {
    if fee_bps > MAX_FEE_BPS {
        return Err(TributaryError::InvalidAmount);
    }
    Ok(())
}

/// Validate policy terms the way the program will
pub fn validate_policy_type(policy_type: &PolicyType) -> Result<()> {
    if policy_type.amount() == 0 {
        return Err(TributaryError::InvalidAmount);
    }

    let PolicyType::Subscription { max_renewals, .. } = policy_type;
    if *max_renewals == Some(0) {
        return Err(TributaryError::InvalidAmount);
    }

    validate_frequency(policy_type.payment_frequency())
}

/// Validate a payment frequency
pub fn validate_frequency(frequency: PaymentFrequency) -> Result<()> {
    if let PaymentFrequency::Custom(seconds) = frequency {
        if seconds < MIN_CUSTOM_INTERVAL_SECONDS {
            return Err(TributaryError::InvalidInterval);
        }
    }
    Ok(())
}

/// Check whether a string parses as a base58 pubkey
#[must_use]
pub fn is_valid_pubkey(value: &str) -> bool {
    Pubkey::from_str(value).is_ok()
}

/// Parse a pubkey, mapping the failure into a `TributaryError`
pub fn parse_pubkey(value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value)
        .map_err(|e| TributaryError::Generic(format!("Invalid pubkey '{value}': {e}")))
}

/// Validate that a string fits a fixed byte field of size `max`
pub fn validate_fixed_string(value: &str, max: usize, field: &str) -> Result<()> {
    if value.len() > max {
        return Err(TributaryError::Generic(format!(
            "{field} exceeds {max} bytes (got {})",
            value.len()
        )));
    }
    Ok(())
}
