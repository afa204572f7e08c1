use anchor_lang::prelude::*;

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_WEEK};

/// How often a policy comes due
///
/// Fixed-length frequencies add whole seconds; the month-based ones add
/// civil-calendar months with end-of-month clamping (see
/// [`crate::schedule`]). `Custom` carries an interval in seconds.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
    Custom(u64),
}

impl PaymentFrequency {
    /// Maximum borsh footprint: 1-byte tag + 8-byte `Custom` payload
    pub const MAX_SERIALIZED_SIZE: usize = 1 + 8;

    /// Fixed interval in seconds, where one exists
    ///
    /// Month-based frequencies have no fixed second count and return the
    /// number of calendar months instead via [`Self::months`].
    #[must_use]
    pub const fn fixed_seconds(self) -> Option<i64> {
        match self {
            Self::Daily => Some(SECONDS_PER_DAY),
            Self::Weekly => Some(SECONDS_PER_WEEK),
            Self::Custom(secs) => Some(secs as i64),
            _ => None,
        }
    }

    /// Calendar months per interval, for the month-based frequencies
    #[must_use]
    pub const fn months(self) -> Option<u32> {
        match self {
            Self::Monthly => Some(1),
            Self::Quarterly => Some(3),
            Self::SemiAnnually => Some(6),
            Self::Annually => Some(12),
            _ => None,
        }
    }
}

/// On-chain policy lifecycle states
///
/// Only `Active` policies execute. `Paused` is reversible by the owner;
/// the terminal transition is deleting the policy account. Richer display
/// states belong to clients, not to this enum.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    Active,
    Paused,
}

/// Fixed payload footprint shared by every `PolicyType` variant
/// (excludes the 1-byte enum tag)
pub const POLICY_TYPE_PAYLOAD_SIZE: usize = 128;

/// Subscription payload: 8 (amount) + 1 (`auto_renew`) + 5
/// (`Option<u32>`) + 9 (frequency) + 8 (`next_payment_due`) = 31 bytes of
/// fields, padded up to [`POLICY_TYPE_PAYLOAD_SIZE`]
pub const SUBSCRIPTION_PADDING: usize = POLICY_TYPE_PAYLOAD_SIZE
    - (8 + 1 + (1 + 4) + PaymentFrequency::MAX_SERIALIZED_SIZE + 8);

/// The payment scheme a policy implements
///
/// All variants MUST occupy exactly [`POLICY_TYPE_PAYLOAD_SIZE`] bytes at
/// their maximum borsh footprint so future variants slot into existing
/// accounts without resizing. Each variant carries explicit padding to
/// make up the difference; creation handlers normalize the padding to
/// zero.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyType {
    Subscription {
        /// Charge per execution, in token base units
        amount: u64,
        /// Whether the policy keeps executing after each payment
        auto_renew: bool,
        /// Cap on total executions; `None` means unbounded
        max_renewals: Option<u32>,
        /// Cadence of the schedule
        payment_frequency: PaymentFrequency,
        /// Unix timestamp the next execution becomes valid at
        next_payment_due: i64,
        /// Reserved; keeps the variant at the fixed payload size
        padding: [u8; SUBSCRIPTION_PADDING],
    },
}

impl PolicyType {
    /// Fixed payload footprint shared by every variant (excludes the
    /// 1-byte enum tag)
    pub const PAYLOAD_SIZE: usize = POLICY_TYPE_PAYLOAD_SIZE;

    /// Padding length of the `Subscription` variant
    pub const SUBSCRIPTION_PADDING: usize = SUBSCRIPTION_PADDING;

    /// Account space reserved for the field: tag + fixed payload
    pub const SIZE: usize = 1 + Self::PAYLOAD_SIZE;

    /// Charge per execution, in token base units
    #[must_use]
    pub const fn amount(&self) -> u64 {
        match self {
            Self::Subscription { amount, .. } => *amount,
        }
    }

    /// Unix timestamp the next execution becomes valid at
    #[must_use]
    pub const fn next_payment_due(&self) -> i64 {
        match self {
            Self::Subscription {
                next_payment_due, ..
            } => *next_payment_due,
        }
    }

    pub fn set_next_payment_due(&mut self, due: i64) {
        match self {
            Self::Subscription {
                next_payment_due, ..
            } => *next_payment_due = due,
        }
    }

    /// Cadence of the schedule
    #[must_use]
    pub const fn payment_frequency(&self) -> PaymentFrequency {
        match self {
            Self::Subscription {
                payment_frequency, ..
            } => *payment_frequency,
        }
    }

    /// Whether the policy keeps executing after each payment
    #[must_use]
    pub const fn auto_renew(&self) -> bool {
        match self {
            Self::Subscription { auto_renew, .. } => *auto_renew,
        }
    }

    /// Cap on total executions; `None` means unbounded
    #[must_use]
    pub const fn max_renewals(&self) -> Option<u32> {
        match self {
            Self::Subscription { max_renewals, .. } => *max_renewals,
        }
    }

    /// Zero the reserved padding bytes
    ///
    /// Clients serialize the padding they were given; the program owns
    /// what lands in the account.
    pub fn normalize_padding(&mut self) {
        match self {
            Self::Subscription { padding, .. } => {
                *padding = [0u8; Self::SUBSCRIPTION_PADDING];
            }
        }
    }
}

/// Global configuration account for program constants and settings
/// PDA seeds: `["config"]`
#[account]
pub struct ProgramConfig {
    /// Admin pubkey for privileged operations
    pub admin: Pubkey, // 32 bytes
    /// Destination owner for protocol fee transfers
    pub fee_recipient: Pubkey, // 32 bytes
    /// Protocol fee in basis points (0-10,000)
    pub protocol_fee_bps: u16, // 2 bytes
    /// Cap on concurrently existing policies per UserPayment account
    pub max_policies_per_user: u32, // 4 bytes
    /// Emergency pause state - when true, all user-facing operations are
    /// disabled while admin operations continue
    pub emergency_pause: bool, // 1 byte
    /// PDA bump seed
    pub bump: u8, // 1 byte
    /// Reserved for future config fields
    pub padding: [u8; 256], // 256 bytes
}

impl ProgramConfig {
    /// Total space: 8 (discriminator) + 32 + 32 + 2 + 4 + 1 + 1 + 256 = 336 bytes
    pub const SIZE: usize = 8 + 32 + 32 + 2 + 4 + 1 + 1 + 256;
}

/// Registered fee-taking payment intermediary
/// PDA seeds: `["gateway", authority]`
#[account]
pub struct PaymentGateway {
    /// Authority allowed to trigger executions through this gateway
    pub authority: Pubkey, // 32 bytes
    /// Destination owner for gateway fee transfers
    pub fee_recipient: Pubkey, // 32 bytes
    /// Gateway fee in basis points (0-10,000)
    pub gateway_fee_bps: u16, // 2 bytes
    /// Whether the gateway may process payments
    pub is_active: bool, // 1 byte
    /// Cumulative token base units processed through this gateway
    pub total_processed: u64, // 8 bytes
    /// Unix timestamp when the gateway was registered
    pub created_at: i64, // 8 bytes
    /// PDA bump seed
    pub bump: u8, // 1 byte
    /// Display name, zero-padded UTF-8
    pub name: [u8; 32], // 32 bytes
    /// Service URL, zero-padded UTF-8
    pub url: [u8; 64], // 64 bytes
    /// Reserved for future gateway fields
    pub padding: [u8; 160], // 160 bytes
}

impl PaymentGateway {
    /// Total space: 8 (discriminator) + 32 + 32 + 2 + 1 + 8 + 8 + 1 + 32 + 64 + 160 = 348 bytes
    pub const SIZE: usize = 8 + 32 + 32 + 2 + 1 + 8 + 8 + 1 + 32 + 64 + 160;
}

/// Per-(owner, mint) payment root account
/// PDA seeds: `["user_payment", owner, token_mint]`
///
/// Owns the lifecycle-count relationship to its policies: a policy cannot
/// exist without its parent UserPayment, and `active_policies_count`
/// tracks how many currently do.
#[account]
pub struct UserPayment {
    /// The wallet that owns this account and its policies
    pub owner: Pubkey, // 32 bytes
    /// Token account payments are pulled from (must carry the delegate
    /// approval for the payments PDA)
    pub token_account: Pubkey, // 32 bytes
    /// Mint of the payment token
    pub token_mint: Pubkey, // 32 bytes
    /// Number of currently existing policies under this account
    pub active_policies_count: u32, // 4 bytes
    /// Unix timestamp when the account was created
    pub created_at: i64, // 8 bytes
    /// Unix timestamp of the last mutation
    pub updated_at: i64, // 8 bytes
    /// Whether the account participates in executions
    pub is_active: bool, // 1 byte
    /// PDA bump seed
    pub bump: u8, // 1 byte
    /// Reserved for future fields
    pub padding: [u8; 256], // 256 bytes
}

impl UserPayment {
    /// Total space: 8 (discriminator) + 32 + 32 + 32 + 4 + 8 + 8 + 1 + 1 + 256 = 382 bytes
    pub const SIZE: usize = 8 + 32 + 32 + 32 + 4 + 8 + 8 + 1 + 1 + 256;
}

/// A single recurring-payment agreement
/// PDA seeds: `["payment_policy", user_payment, policy_id as u32 LE]`
#[account]
pub struct PaymentPolicy {
    /// Parent UserPayment PDA
    pub user_payment: Pubkey, // 32 bytes
    /// Wallet whose token account receives the net payment
    pub recipient: Pubkey, // 32 bytes
    /// Gateway PDA this policy is routed through
    pub gateway: Pubkey, // 32 bytes
    /// Payment scheme, fixed 128-byte payload
    pub policy_type: PolicyType, // 129 bytes (1 tag + 128 payload)
    /// Lifecycle state
    pub status: PaymentStatus, // 1 byte
    /// Free-form memo attached to every PaymentRecord, zero-padded
    pub memo: [u8; 64], // 64 bytes
    /// Cumulative token base units paid out under this policy
    pub total_paid: u64, // 8 bytes
    /// Number of successful executions
    pub payment_count: u32, // 4 bytes
    /// Unix timestamp when the policy was created
    pub created_at: i64, // 8 bytes
    /// Unix timestamp of the last mutation
    pub updated_at: i64, // 8 bytes
    /// Client-assigned identifier, part of the PDA seeds
    pub policy_id: u32, // 4 bytes
    /// PDA bump seed
    pub bump: u8, // 1 byte
    /// Reserved for future fields
    pub padding: [u8; 256], // 256 bytes
}

impl PaymentPolicy {
    /// Total space: 8 (discriminator) + 32 + 32 + 32 + 129 + 1 + 64 + 8 + 4 + 8 + 8 + 4 + 1 + 256 = 587 bytes
    pub const SIZE: usize =
        8 + 32 + 32 + 32 + PolicyType::SIZE + 1 + 64 + 8 + 4 + 8 + 8 + 4 + 1 + 256;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_type_payload_is_fixed_128_bytes() {
        // The worst-case variant footprint defines the layout contract:
        // Custom frequency (9 bytes) and Some(max_renewals) (5 bytes).
        let fat = PolicyType::Subscription {
            amount: u64::MAX,
            auto_renew: true,
            max_renewals: Some(u32::MAX),
            payment_frequency: PaymentFrequency::Custom(u64::MAX),
            next_payment_due: i64::MAX,
            padding: [0u8; PolicyType::SUBSCRIPTION_PADDING],
        };
        let bytes = fat.try_to_vec().unwrap();
        assert_eq!(bytes.len(), PolicyType::SIZE);
        assert_eq!(bytes.len() - 1, PolicyType::PAYLOAD_SIZE);
    }

    #[test]
    fn slim_variants_fit_under_the_payload_cap() {
        // Daily frequency and no renewal cap serialize shorter than the
        // reserved footprint; the account allocation must still cover the
        // fat encoding above.
        let slim = PolicyType::Subscription {
            amount: 1,
            auto_renew: false,
            max_renewals: None,
            payment_frequency: PaymentFrequency::Daily,
            next_payment_due: 0,
            padding: [0u8; PolicyType::SUBSCRIPTION_PADDING],
        };
        let bytes = slim.try_to_vec().unwrap();
        assert!(bytes.len() <= PolicyType::SIZE);
    }

    #[test]
    fn policy_type_round_trips() {
        let original = PolicyType::Subscription {
            amount: 5_000_000,
            auto_renew: true,
            max_renewals: Some(12),
            payment_frequency: PaymentFrequency::Weekly,
            next_payment_due: 1_700_000_000,
            padding: [0u8; PolicyType::SUBSCRIPTION_PADDING],
        };
        let bytes = original.try_to_vec().unwrap();
        let decoded = PolicyType::try_from_slice(&bytes).unwrap();
        assert_eq!(original, decoded);
        assert_eq!(decoded.amount(), 5_000_000);
        assert_eq!(decoded.max_renewals(), Some(12));
        assert_eq!(decoded.payment_frequency(), PaymentFrequency::Weekly);
    }

    #[test]
    fn payment_status_round_trips() {
        for status in [PaymentStatus::Active, PaymentStatus::Paused] {
            let bytes = status.try_to_vec().unwrap();
            assert_eq!(bytes.len(), 1);
            assert_eq!(PaymentStatus::try_from_slice(&bytes).unwrap(), status);
        }
    }

    #[test]
    fn frequency_fixed_seconds() {
        assert_eq!(PaymentFrequency::Daily.fixed_seconds(), Some(86_400));
        assert_eq!(PaymentFrequency::Weekly.fixed_seconds(), Some(604_800));
        assert_eq!(
            PaymentFrequency::Custom(3_600).fixed_seconds(),
            Some(3_600)
        );
        assert_eq!(PaymentFrequency::Monthly.fixed_seconds(), None);
        assert_eq!(PaymentFrequency::Annually.months(), Some(12));
    }

    #[test]
    fn normalize_padding_zeroes_reserved_bytes() {
        let mut policy_type = PolicyType::Subscription {
            amount: 1,
            auto_renew: true,
            max_renewals: None,
            payment_frequency: PaymentFrequency::Daily,
            next_payment_due: 0,
            padding: [0xAA; PolicyType::SUBSCRIPTION_PADDING],
        };
        policy_type.normalize_padding();
        let PolicyType::Subscription { padding, .. } = policy_type;
        assert_eq!(padding, [0u8; PolicyType::SUBSCRIPTION_PADDING]);
    }
}
