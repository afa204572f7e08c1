use anchor_lang::prelude::*;

/// Custom error codes for the recurring payments protocol
///
/// Anchor assigns codes starting from 6000 in declaration order. The
/// first thirteen variants (6000-6012) are part of the deployed ABI that
/// client SDKs map on; new variants are only ever appended.
#[error_code]
pub enum RecurringPaymentsError {
    /// Error Code: 6000
    #[msg("Program is paused")]
    ProgramPaused,

    /// Error Code: 6001
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    /// Error Code: 6002
    #[msg("Invalid payment frequency")]
    InvalidFrequency,

    /// Error Code: 6003
    #[msg("Maximum policies per user reached")]
    MaxPoliciesReached,

    /// Error Code: 6004
    #[msg("unauthorized")]
    Unauthorized,

    /// Error Code: 6005
    #[msg("Invalid policy status transition")]
    InvalidPolicyStatusTransition,

    /// Error Code: 6006
    #[msg("Payment policy not found")]
    PolicyNotFound,

    /// Error Code: 6007
    /// When the delegate allowance no longer covers the policy amount
    #[msg("Insufficient delegated amount")]
    InsufficientDelegatedAmount,

    /// Error Code: 6008
    #[msg("Payment is not yet due")]
    PaymentNotDue,

    /// Error Code: 6009
    #[msg("Insufficient balance for payment")]
    InsufficientBalance,

    /// Error Code: 6010
    /// When the token account has no delegate, or a delegate other than
    /// the payments PDA
    #[msg("No or incorrect delegate set in ata")]
    NoDelegateSet,

    /// Error Code: 6011
    #[msg("Payment policy is paused")]
    PolicyPaused,

    /// Error Code: 6012
    /// When a custom interval is below the protocol floor
    #[msg("Invalid Interval")]
    InvalidInterval,

    /// Error Code: 6013
    /// When arithmetic would overflow or underflow
    #[msg("Arithmetic operation would result in overflow or underflow.")]
    ArithmeticError,

    /// Error Code: 6014
    /// When a policy references a gateway that has been deactivated
    #[msg("Payment gateway is inactive. Policies referencing it cannot execute until it is reactivated.")]
    GatewayInactive,

    /// Error Code: 6015
    /// When the program data account is invalid or cannot be deserialized
    #[msg("Invalid program data account. Ensure the account is the correct program data account for this program.")]
    InvalidProgramData,
}
