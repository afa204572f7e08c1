//! Program account types and structures
//!
//! Byte-compatible mirrors of the on-chain accounts (minus the 8-byte
//! discriminator) plus the instruction argument types. Borsh derives
//! match the program layout exactly; serde derives exist for JSON
//! surfaces like dashboards and logs.

use anchor_lang::prelude::*;
use serde::{Deserialize, Serialize};

/// serde helpers for byte arrays longer than 32 (serde's derive only
/// covers `Deserialize` up to that length)
pub(crate) mod serde_big_array {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(value: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(value)
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = Vec::deserialize(deserializer)?;
        bytes
            .try_into()
            .map_err(|_| D::Error::custom("byte array has the wrong length"))
    }
}

/// How often a policy comes due
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize,
)]
pub enum PaymentFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
    /// Interval in seconds (minimum one hour)
    Custom(u64),
}

/// On-chain policy lifecycle states
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize,
)]
pub enum PaymentStatus {
    Active,
    Paused,
}

/// Size of the reserved tail in every `PolicyType` variant
pub const POLICY_TYPE_PADDING: usize = 97;

/// The payment scheme a policy implements
///
/// Every variant is padded to a fixed 128-byte payload on-chain; keep the
/// padding field zeroed when constructing values client-side.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize,
)]
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
        /// Unix timestamp the next execution becomes valid at;
        /// non-positive means "due at creation time"
        next_payment_due: i64,
        /// Reserved, must be zero
        #[serde(with = "serde_big_array")]
        padding: [u8; POLICY_TYPE_PADDING],
    },
}

impl PolicyType {
    /// Build a subscription policy payload with zeroed padding
    #[must_use]
    pub const fn subscription(
        amount: u64,
        payment_frequency: PaymentFrequency,
        auto_renew: bool,
        max_renewals: Option<u32>,
        next_payment_due: i64,
    ) -> Self {
        Self::Subscription {
            amount,
            auto_renew,
            max_renewals,
            payment_frequency,
            next_payment_due,
            padding: [0u8; POLICY_TYPE_PADDING],
        }
    }

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

    /// Cadence of the schedule
    #[must_use]
    pub const fn payment_frequency(&self) -> PaymentFrequency {
        match self {
            Self::Subscription {
                payment_frequency, ..
            } => *payment_frequency,
        }
    }
}

/// Global configuration account
/// PDA seeds: `["config"]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct ProgramConfig {
    /// Admin pubkey for privileged operations
    pub admin: Pubkey,
    /// Destination owner for protocol fee transfers
    pub fee_recipient: Pubkey,
    /// Protocol fee in basis points (0-10,000)
    pub protocol_fee_bps: u16,
    /// Cap on concurrently existing policies per user
    pub max_policies_per_user: u32,
    /// Emergency pause state
    pub emergency_pause: bool,
    /// PDA bump seed
    pub bump: u8,
    /// Reserved
    #[serde(with = "serde_big_array")]
    pub padding: [u8; 256],
}

/// Registered fee-taking payment intermediary
/// PDA seeds: `["gateway", authority]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct PaymentGateway {
    /// Authority allowed to trigger executions through this gateway
    pub authority: Pubkey,
    /// Destination owner for gateway fee transfers
    pub fee_recipient: Pubkey,
    /// Gateway fee in basis points (0-10,000)
    pub gateway_fee_bps: u16,
    /// Whether the gateway may process payments
    pub is_active: bool,
    /// Cumulative token base units processed through this gateway
    pub total_processed: u64,
    /// Unix timestamp when the gateway was registered
    pub created_at: i64,
    /// PDA bump seed
    pub bump: u8,
    /// Display name, zero-padded UTF-8
    pub name: [u8; 32],
    /// Service URL, zero-padded UTF-8
    #[serde(with = "serde_big_array")]
    pub url: [u8; 64],
    /// Reserved
    #[serde(with = "serde_big_array")]
    pub padding: [u8; 160],
}

impl PaymentGateway {
    /// Display name with the zero padding stripped
    #[must_use]
    pub fn name_str(&self) -> String {
        bytes_to_string(&self.name)
    }

    /// Service URL with the zero padding stripped
    #[must_use]
    pub fn url_str(&self) -> String {
        bytes_to_string(&self.url)
    }
}

/// Per-(owner, mint) payment root account
/// PDA seeds: `["user_payment", owner, token_mint]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct UserPayment {
    /// The wallet that owns this account and its policies
    pub owner: Pubkey,
    /// Token account payments are pulled from
    pub token_account: Pubkey,
    /// Mint of the payment token
    pub token_mint: Pubkey,
    /// Number of currently existing policies under this account
    pub active_policies_count: u32,
    /// Unix timestamp when the account was created
    pub created_at: i64,
    /// Unix timestamp of the last mutation
    pub updated_at: i64,
    /// Whether the account participates in executions
    pub is_active: bool,
    /// PDA bump seed
    pub bump: u8,
    /// Reserved
    #[serde(with = "serde_big_array")]
    pub padding: [u8; 256],
}

/// A single recurring-payment agreement
/// PDA seeds: `["payment_policy", user_payment, policy_id as u32 LE]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct PaymentPolicy {
    /// Parent UserPayment PDA
    pub user_payment: Pubkey,
    /// Wallet whose token account receives the net payment
    pub recipient: Pubkey,
    /// Gateway PDA this policy is routed through
    pub gateway: Pubkey,
    /// Payment scheme, fixed 128-byte payload
    pub policy_type: PolicyType,
    /// Lifecycle state
    pub status: PaymentStatus,
    /// Free-form memo attached to every PaymentRecord, zero-padded
    #[serde(with = "serde_big_array")]
    pub memo: [u8; 64],
    /// Cumulative token base units paid out under this policy
    pub total_paid: u64,
    /// Number of successful executions
    pub payment_count: u32,
    /// Unix timestamp when the policy was created
    pub created_at: i64,
    /// Unix timestamp of the last mutation
    pub updated_at: i64,
    /// Client-assigned identifier, part of the PDA seeds
    pub policy_id: u32,
    /// PDA bump seed
    pub bump: u8,
    /// Reserved
    #[serde(with = "serde_big_array")]
    pub padding: [u8; 256],
}

impl PaymentPolicy {
    /// Memo with the zero padding stripped
    #[must_use]
    pub fn memo_str(&self) -> String {
        bytes_to_string(&self.memo)
    }
}

/// Arguments for the admin `update_config` instruction
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize,
)]
pub struct UpdateConfigArgs {
    /// New destination owner for protocol fee transfers
    pub fee_recipient: Pubkey,
    /// New protocol fee in basis points (0-10,000)
    pub protocol_fee_bps: u16,
    /// New cap on concurrently existing policies per user
    pub max_policies_per_user: u32,
}

/// Decode a zero-padded UTF-8 byte field into a `String`
fn bytes_to_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Encode a string into a zero-padded fixed byte field, truncating at the
/// field size
#[must_use]
pub fn string_to_bytes<const N: usize>(value: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let take = value.len().min(N);
    out[..take].copy_from_slice(&value.as_bytes()[..take]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_type_constructor_zeroes_padding() {
        let policy_type =
            PolicyType::subscription(5_000_000, PaymentFrequency::Weekly, true, Some(12), 0);
        let PolicyType::Subscription { padding, .. } = policy_type;
        assert_eq!(padding, [0u8; POLICY_TYPE_PADDING]);
        assert_eq!(policy_type.amount(), 5_000_000);
    }

    #[test]
    fn string_round_trip_through_fixed_bytes() {
        let name: [u8; 32] = string_to_bytes("Acme Payments");
        assert_eq!(bytes_to_string(&name), "Acme Payments");

        // Truncation at the field boundary.
        let long: [u8; 8] = string_to_bytes("0123456789");
        assert_eq!(bytes_to_string(&long), "01234567");
    }

    #[test]
    fn policy_type_borsh_matches_program_layout() {
        let policy_type =
            PolicyType::subscription(1, PaymentFrequency::Custom(u64::MAX), true, Some(1), 1);
        let bytes = policy_type.try_to_vec().unwrap();
        // Widest encoding: 1 tag + 128-byte payload.
        assert_eq!(bytes.len(), 129);
        let decoded = PolicyType::try_from_slice(&bytes).unwrap();
        assert_eq!(decoded, policy_type);
    }

    #[test]
    fn gateway_serde_round_trip() {
        let gateway = PaymentGateway {
            authority: Pubkey::new_unique(),
            fee_recipient: Pubkey::new_unique(),
            gateway_fee_bps: 50,
            is_active: true,
            total_processed: 0,
            created_at: 1_700_000_000,
            bump: 255,
            name: string_to_bytes("Acme"),
            url: string_to_bytes("https://acme.example"),
            padding: [0u8; 160],
        };
        let json = serde_json::to_string(&gateway).unwrap();
        let decoded: PaymentGateway = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, gateway);
        assert_eq!(decoded.name_str(), "Acme");
        assert_eq!(decoded.url_str(), "https://acme.example");
    }
}
