//! Error types for the Tributary SDK
//!
//! Provides typed error handling for SDK operations, including automatic
//! mapping of the program's numeric error codes to meaningful variants.
//!
//! # Program Error Mapping
//!
//! The SDK maps the on-chain error codes to dedicated variants:
//!
//! - **6000**: `ProgramPaused` - the emergency pause is engaged
//! - **6001**: `InvalidAmount` - zero or out-of-range amount
//! - **6002**: `InvalidFrequency` - unrecognized payment frequency
//! - **6003**: `MaxPoliciesReached` - per-user policy cap hit
//! - **6004**: `Unauthorized` - signer lacks authority for the operation
//! - **6005**: `InvalidPolicyStatusTransition` - no-op status change
//! - **6006**: `PolicyNotFound` - policy account missing or mismatched
//! - **6007**: `InsufficientDelegatedAmount` - allowance below amount
//! - **6008**: `PaymentNotDue` - executed before `next_payment_due`
//! - **6009**: `InsufficientBalance` - token balance below amount
//! - **6010**: `NoDelegateSet` - missing or foreign token delegate
//! - **6011**: `PolicyPaused` - policy is not in the Active state
//! - **6012**: `InvalidInterval` - custom interval below the floor
//! - **6013**: `ArithmeticError` - checked arithmetic failed on-chain
//! - **6014**: `GatewayInactive` - referenced gateway is deactivated

use thiserror::Error;

/// Result type for Tributary SDK operations
pub type Result<T> = std::result::Result<T, TributaryError>;

/// Error types that can occur when using the Tributary SDK
#[derive(Error, Debug)]
pub enum TributaryError {
    /// Error from the Anchor framework
    #[error("Anchor error: {0}")]
    Anchor(anchor_lang::error::Error),

    /// Error from the Anchor client
    #[error("Anchor client error: {0}")]
    AnchorClient(Box<anchor_client::ClientError>),

    /// Error parsing a public key
    #[error("Solana SDK error: {0}")]
    Solana(#[from] anchor_client::solana_sdk::pubkey::ParsePubkeyError),

    /// Error from SPL Token
    #[error("SPL Token error: {0}")]
    SplToken(#[from] spl_token::error::TokenError),

    /// Error from the Solana program layer
    #[error("Program error: {0}")]
    Program(#[from] solana_program::program_error::ProgramError),

    /// Error from serde JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("Tributary SDK error: {0}")]
    Generic(String),

    /// Event parsing error
    #[error("Event parsing error: {0}")]
    ParseError(String),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account data did not carry the expected discriminator
    #[error("Account discriminator mismatch for {0}")]
    DiscriminatorMismatch(String),

    /// Token program detection failed
    #[error("Failed to detect token program for mint: {mint}")]
    TokenProgramDetectionFailed { mint: String },

    /// RPC error for blockchain queries
    #[error("RPC error: {0}")]
    RpcError(String),

    // Typed program error variants (Anchor error codes 6000-6014)
    /// Program is paused (program error 6000)
    #[error("Program is paused. All user-facing operations are disabled until the admin unpauses.")]
    ProgramPaused,

    /// Invalid amount (program error 6001)
    #[error("Amount must be greater than zero.")]
    InvalidAmount,

    /// Invalid payment frequency (program error 6002)
    #[error("Invalid payment frequency.")]
    InvalidFrequency,

    /// Policy cap reached (program error 6003)
    #[error("Maximum policies per user reached. Delete an existing policy before creating a new one.")]
    MaxPoliciesReached,

    /// Unauthorized (program error 6004)
    #[error("Unauthorized. Only the policy owner or the gateway authority can perform this action.")]
    Unauthorized,

    /// Invalid status transition (program error 6005)
    #[error("Invalid policy status transition. The requested status equals the current status.")]
    InvalidPolicyStatusTransition,

    /// Policy not found (program error 6006)
    #[error("Payment policy not found. Ensure the policy exists under this user payment account.")]
    PolicyNotFound,

    /// Insufficient delegated amount (program error 6007)
    #[error("Insufficient delegated amount. Approve a larger delegate allowance (recommended: 2x the policy amount) to keep payments flowing.")]
    InsufficientDelegatedAmount,

    /// Payment not due (program error 6008)
    #[error("Payment is not yet due. Next payment is scheduled for later.")]
    PaymentNotDue,

    /// Insufficient balance (program error 6009)
    #[error("Insufficient token balance to complete the payment.")]
    InsufficientBalance,

    /// No delegate set (program error 6010)
    #[error("No or incorrect delegate set on the token account. Approve the payments delegate PDA and retry.")]
    NoDelegateSet,

    /// Policy paused (program error 6011)
    #[error("Payment policy is paused. Resume it before executing.")]
    PolicyPaused,

    /// Invalid interval (program error 6012)
    #[error("Invalid interval. Custom intervals must be at least one hour.")]
    InvalidInterval,

    /// Arithmetic error (program error 6013)
    #[error("Arithmetic operation would result in overflow or underflow.")]
    ArithmeticError,

    /// Gateway inactive (program error 6014)
    #[error("Payment gateway is inactive. Policies referencing it cannot execute until it is reactivated.")]
    GatewayInactive,

    /// Invalid program data account (program error 6015)
    #[error("Invalid program data account. Initialization must be signed by the upgrade authority.")]
    InvalidProgramData,
}

impl From<anchor_client::ClientError> for TributaryError {
    fn from(error: anchor_client::ClientError) -> Self {
        Self::from_anchor_client_error(error)
    }
}

impl From<anchor_lang::error::Error> for TributaryError {
    fn from(error: anchor_lang::error::Error) -> Self {
        Self::from_anchor_error(error)
    }
}

impl From<String> for TributaryError {
    fn from(msg: String) -> Self {
        Self::Generic(msg)
    }
}

impl From<&str> for TributaryError {
    fn from(msg: &str) -> Self {
        Self::Generic(msg.to_string())
    }
}

impl From<anyhow::Error> for TributaryError {
    fn from(error: anyhow::Error) -> Self {
        Self::Generic(error.to_string())
    }
}

impl TributaryError {
    /// Map a numeric program error code to its typed variant, if any
    #[must_use]
    pub const fn from_error_code(error_code: u32) -> Option<Self> {
        match error_code {
            6000 => Some(Self::ProgramPaused),
            6001 => Some(Self::InvalidAmount),
            6002 => Some(Self::InvalidFrequency),
            6003 => Some(Self::MaxPoliciesReached),
            6004 => Some(Self::Unauthorized),
            6005 => Some(Self::InvalidPolicyStatusTransition),
            6006 => Some(Self::PolicyNotFound),
            6007 => Some(Self::InsufficientDelegatedAmount),
            6008 => Some(Self::PaymentNotDue),
            6009 => Some(Self::InsufficientBalance),
            6010 => Some(Self::NoDelegateSet),
            6011 => Some(Self::PolicyPaused),
            6012 => Some(Self::InvalidInterval),
            6013 => Some(Self::ArithmeticError),
            6014 => Some(Self::GatewayInactive),
            6015 => Some(Self::InvalidProgramData),
            _ => None,
        }
    }

    /// Map an Anchor error to a typed `TributaryError` variant
    ///
    /// Falls back to the generic Anchor wrapper when the code is not one
    /// of the program's.
    #[must_use]
    pub fn from_anchor_error(anchor_error: anchor_lang::error::Error) -> Self {
        use anchor_lang::error::Error;

        match &anchor_error {
            Error::AnchorError(anchor_err) => {
                Self::from_error_code(anchor_err.error_code_number)
                    .unwrap_or(Self::Anchor(anchor_error))
            }
            Error::ProgramError(_) => Self::Anchor(anchor_error),
        }
    }

    /// Map an Anchor client error, digging the custom instruction error
    /// code out of the transaction error when present
    pub fn from_anchor_client_error(client_error: anchor_client::ClientError) -> Self {
        if let anchor_client::ClientError::SolanaClientError(solana_err) = &client_error {
            if let Some(
                anchor_client::solana_sdk::transaction::TransactionError::InstructionError(
                    _,
                    anchor_client::solana_sdk::instruction::InstructionError::Custom(error_code),
                ),
            ) = solana_err.get_transaction_error()
            {
                if let Some(mapped) = Self::from_error_code(error_code) {
                    return mapped;
                }
            }
        }

        Self::AnchorClient(Box::new(client_error))
    }
}
