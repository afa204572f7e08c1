use anchor_lang::prelude::*;

use crate::state::PaymentStatus;

/// Event emitted for every successful payment execution
///
/// This is the canonical audit record: indexers reconstruct full payment
/// history from these events alone. `record_id` is the policy's
/// `payment_count` after the execution, so records for one policy form a
/// gapless 1-based sequence.
#[event]
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
    pub memo: [u8; 64],
    /// Sequence number of this payment within the policy
    pub record_id: u32,
}

/// Event emitted when the global configuration is initialized
#[event]
pub struct ConfigInitialized {
    /// Admin pubkey for privileged operations
    pub admin: Pubkey,
    /// Destination owner for protocol fee transfers
    pub fee_recipient: Pubkey,
    /// Protocol fee in basis points
    pub protocol_fee_bps: u16,
    /// Cap on concurrently existing policies per user
    pub max_policies_per_user: u32,
    /// Unix timestamp when config was initialized
    pub timestamp: i64,
}

/// Event emitted when the admin updates the global configuration
///
/// Off-chain systems monitor this to track fee changes and adjust
/// projected payouts before the next execution cycle.
#[event]
pub struct ConfigUpdated {
    /// Destination owner for protocol fee transfers
    pub fee_recipient: Pubkey,
    /// Protocol fee in basis points
    pub protocol_fee_bps: u16,
    /// Cap on concurrently existing policies per user
    pub max_policies_per_user: u32,
    /// Admin who made the update
    pub updated_by: Pubkey,
}

/// Event emitted when the emergency pause state flips
#[event]
pub struct ProgramPauseToggled {
    /// New pause state
    pub paused: bool,
    /// Admin who toggled the state
    pub authority: Pubkey,
    /// Unix timestamp of the toggle
    pub timestamp: i64,
}

/// Event emitted when a payment gateway is registered
#[event]
pub struct GatewayRegistered {
    /// The gateway PDA
    pub gateway: Pubkey,
    /// Authority allowed to trigger executions through the gateway
    pub authority: Pubkey,
    /// Destination owner for gateway fee transfers
    pub fee_recipient: Pubkey,
    /// Gateway fee in basis points
    pub gateway_fee_bps: u16,
    /// Unix timestamp of registration
    pub timestamp: i64,
}

/// Event emitted when a gateway's active flag changes
///
/// Policies referencing a deactivated gateway stop executing (they fail
/// with `GatewayInactive`) until the gateway is reactivated; indexers use
/// this event to warn affected policy owners.
#[event]
pub struct GatewayStatusChanged {
    /// The gateway PDA
    pub gateway: Pubkey,
    /// New active state
    pub is_active: bool,
    /// Who changed the status: "authority" or "admin"
    pub changed_by: String,
}

/// Event emitted when a user payment account is created
#[event]
pub struct UserPaymentCreated {
    /// The user payment PDA
    pub user_payment: Pubkey,
    /// The wallet that owns the account
    pub owner: Pubkey,
    /// Mint of the payment token
    pub token_mint: Pubkey,
    /// Unix timestamp of creation
    pub timestamp: i64,
}

/// Event emitted when a payment policy is created
#[event]
pub struct PolicyCreated {
    /// The policy PDA
    pub payment_policy: Pubkey,
    /// Parent user payment PDA
    pub user_payment: Pubkey,
    /// Wallet receiving the net payments
    pub recipient: Pubkey,
    /// Gateway the policy is routed through
    pub gateway: Pubkey,
    /// Client-assigned policy identifier
    pub policy_id: u32,
    /// Charge per execution, in token base units
    pub amount: u64,
    /// Unix timestamp the first execution becomes valid at
    pub next_payment_due: i64,
}

/// Event emitted when a policy moves between Active and Paused
#[event]
pub struct PolicyStatusChanged {
    /// The policy PDA
    pub payment_policy: Pubkey,
    /// Owner who requested the change
    pub owner: Pubkey,
    /// Resulting status
    pub new_status: PaymentStatus,
    /// Unix timestamp of the change
    pub timestamp: i64,
}

/// Event emitted when a policy account is closed and rent reclaimed
#[event]
pub struct PolicyClosed {
    /// The policy PDA that was closed
    pub payment_policy: Pubkey,
    /// Parent user payment PDA
    pub user_payment: Pubkey,
    /// Owner who closed the policy and received the rent
    pub owner: Pubkey,
    /// Client-assigned policy identifier
    pub policy_id: u32,
}

/// Event emitted when an execution succeeds but the remaining delegated
/// allowance is low
///
/// The current payment went through; the next one fails with
/// `InsufficientDelegatedAmount` unless the owner tops up the approval.
/// Emitted when the remaining allowance drops below twice the policy
/// amount, giving off-chain systems a full cycle of advance notice.
#[event]
pub struct LowAllowanceWarning {
    /// The policy whose token account is running low
    pub payment_policy: Pubkey,
    /// Owner who needs to increase the delegate approval
    pub owner: Pubkey,
    /// Remaining delegated allowance after this execution
    pub remaining_allowance: u64,
    /// Recommended minimum allowance (2x policy amount)
    pub recommended_allowance: u64,
    /// Policy amount for reference
    pub amount: u64,
}
