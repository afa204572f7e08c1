use anchor_lang::prelude::*;

use crate::constants::FEE_BASIS_POINTS_DIVISOR;
use crate::errors::RecurringPaymentsError;

/// How one gross payment amount splits across the three destinations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeBreakdown {
    /// Net amount for the policy recipient
    pub recipient_amount: u64,
    /// Cut for the protocol fee recipient
    pub protocol_fee: u64,
    /// Cut for the gateway fee recipient
    pub gateway_fee: u64,
}

/// Split a gross payment into recipient, protocol and gateway portions
///
/// Integer basis-point math with truncation toward zero, computed in u128
/// so `amount * bps` cannot overflow. The protocol fee is taken first;
/// the gateway fee is capped at whatever remains, so
/// `protocol_fee + gateway_fee <= amount` holds for every bps pair in
/// `[0, 10_000]` — including both at 10_000, where the recipient gets
/// nothing rather than the math underflowing.
///
/// # Errors
/// Returns `ArithmeticError` if an intermediate conversion fails. With
/// bps bounded at 10_000 the intermediates always fit; the checks guard
/// the invariant rather than an expected path.
pub fn fee_breakdown(
    amount: u64,
    protocol_fee_bps: u16,
    gateway_fee_bps: u16,
) -> Result<FeeBreakdown> {
    let protocol_fee = bps_share(amount, protocol_fee_bps)?;

    let after_protocol = amount
        .checked_sub(protocol_fee)
        .ok_or(RecurringPaymentsError::ArithmeticError)?;

    let gateway_fee = bps_share(amount, gateway_fee_bps)?.min(after_protocol);

    let recipient_amount = after_protocol
        .checked_sub(gateway_fee)
        .ok_or(RecurringPaymentsError::ArithmeticError)?;

    Ok(FeeBreakdown {
        recipient_amount,
        protocol_fee,
        gateway_fee,
    })
}

/// `amount * bps / 10_000`, truncating toward zero
fn bps_share(amount: u64, bps: u16) -> Result<u64> {
    u64::try_from(
        u128::from(amount)
            .checked_mul(u128::from(bps))
            .ok_or(RecurringPaymentsError::ArithmeticError)?
            .checked_div(FEE_BASIS_POINTS_DIVISOR)
            .ok_or(RecurringPaymentsError::ArithmeticError)?,
    )
    .map_err(|_| RecurringPaymentsError::ArithmeticError.into())
}
