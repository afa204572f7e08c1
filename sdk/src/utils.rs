//! General utilities for schedules, amounts and memos

use anchor_client::solana_sdk::instruction::Instruction;
use chrono::{DateTime, Months, Utc};

use crate::error::{Result, TributaryError};
use crate::program_types::{PaymentFrequency, PaymentPolicy, PaymentStatus};

/// Fixed interval in seconds for the non-calendar frequencies
///
/// Month-based frequencies have no fixed second count; use
/// [`next_due_after`] for those.
#[must_use]
pub const fn frequency_interval_seconds(frequency: PaymentFrequency) -> Option<i64> {
    match frequency {
        PaymentFrequency::Daily => Some(86_400),
        PaymentFrequency::Weekly => Some(604_800),
        PaymentFrequency::Custom(seconds) => Some(seconds as i64),
        _ => None,
    }
}

/// Calendar months per interval for the month-based frequencies
#[must_use]
pub const fn frequency_months(frequency: PaymentFrequency) -> Option<u32> {
    match frequency {
        PaymentFrequency::Monthly => Some(1),
        PaymentFrequency::Quarterly => Some(3),
        PaymentFrequency::SemiAnnually => Some(6),
        PaymentFrequency::Annually => Some(12),
        _ => None,
    }
}

/// Whether a policy is executable at `now`
///
/// Mirrors the on-chain checks: the policy must be Active and its due
/// date reached (`now == due` counts as due).
#[must_use]
pub fn is_payment_due(policy: &PaymentPolicy, now: i64) -> bool {
    policy.status == PaymentStatus::Active && now >= policy.policy_type.next_payment_due()
}

/// Predict the due date the program will set after an execution at `now`
///
/// Mirrors the on-chain schedule advance: intervals are added to the
/// previous due date (not to `now`) until the result is strictly in the
/// future, with calendar-month arithmetic clamping to month ends.
pub fn next_due_after(current_due: i64, frequency: PaymentFrequency, now: i64) -> Result<i64> {
    let mut next_due = current_due;

    if let Some(seconds) = frequency_interval_seconds(frequency) {
        if seconds <= 0 {
            return Err(TributaryError::InvalidInterval);
        }
        while next_due <= now {
            next_due = next_due
                .checked_add(seconds)
                .ok_or(TributaryError::ArithmeticError)?;
        }
        return Ok(next_due);
    }

    let months = frequency_months(frequency).ok_or(TributaryError::InvalidFrequency)?;
    while next_due <= now {
        let date = DateTime::<Utc>::from_timestamp(next_due, 0)
            .ok_or(TributaryError::ArithmeticError)?;
        next_due = date
            .checked_add_months(Months::new(months))
            .ok_or(TributaryError::ArithmeticError)?
            .timestamp();
    }
    Ok(next_due)
}

/// Convert base units to a UI amount string (e.g. `5000000` at 6
/// decimals -> `"5.000000"`)
#[must_use]
pub fn amount_to_ui(amount: u64, decimals: u8) -> String {
    let divisor = 10u128.pow(u32::from(decimals));
    let amount = u128::from(amount);
    let whole = amount / divisor;
    let frac = amount % divisor;
    if decimals == 0 {
        whole.to_string()
    } else {
        format!("{whole}.{frac:0width$}", width = decimals as usize)
    }
}

/// Convert a UI amount string to base units, rejecting excess precision
pub fn ui_to_amount(value: &str, decimals: u8) -> Result<u64> {
    let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
    if frac.len() > decimals as usize {
        return Err(TributaryError::Generic(format!(
            "amount '{value}' has more than {decimals} decimal places"
        )));
    }

    let whole: u128 = whole
        .parse()
        .map_err(|_| TributaryError::Generic(format!("invalid amount '{value}'")))?;
    let frac_units: u128 = if frac.is_empty() {
        0
    } else {
        let parsed: u128 = frac
            .parse()
            .map_err(|_| TributaryError::Generic(format!("invalid amount '{value}'")))?;
        parsed * 10u128.pow(u32::from(decimals) - u32::try_from(frac.len()).unwrap_or(0))
    };

    let base = whole
        .checked_mul(10u128.pow(u32::from(decimals)))
        .and_then(|w| w.checked_add(frac_units))
        .ok_or(TributaryError::ArithmeticError)?;

    u64::try_from(base).map_err(|_| TributaryError::ArithmeticError)
}

/// Render a Unix timestamp as an RFC 3339 string for logs and UIs
#[must_use]
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map_or_else(|| format!("invalid timestamp {timestamp}"), |dt| dt.to_rfc3339())
}

/// Build an SPL memo instruction to ride along with a payment
/// transaction
#[must_use]
pub fn create_memo_instruction(memo: &str) -> Instruction {
    Instruction {
        program_id: spl_memo::ID,
        accounts: vec![],
        data: memo.as_bytes().to_vec(),
    }
}
