//! Program constants
//!
//! Seeds, fee math constants and protocol defaults shared across
//! instructions. These values are protocol-level invariants and must not
//! change post-deployment: every PDA in the wild is derived from these
//! seeds, and historical fee accounting assumes this divisor.

/// PDA seed for the singleton [`crate::state::ProgramConfig`] account
pub const CONFIG_SEED: &[u8] = b"config";

/// PDA seed prefix for [`crate::state::PaymentGateway`] accounts
/// (full seeds: `["gateway", authority]`)
pub const GATEWAY_SEED: &[u8] = b"gateway";

/// PDA seed prefix for [`crate::state::UserPayment`] accounts
/// (full seeds: `["user_payment", owner, token_mint]`)
pub const USER_PAYMENT_SEED: &[u8] = b"user_payment";

/// PDA seed prefix for [`crate::state::PaymentPolicy`] accounts
/// (full seeds: `["payment_policy", user_payment, policy_id as u32 LE]`)
pub const PAYMENT_POLICY_SEED: &[u8] = b"payment_policy";

/// PDA seed for the global payments delegate signer
///
/// The delegate PDA holds no data. Users grant it a standard SPL token
/// delegate approval once; `execute_payment` then signs transfers with it
/// under program control. A single global delegate lets one token account
/// serve policies across any number of gateways without approval
/// conflicts.
pub const PAYMENTS_SEED: &[u8] = b"payments";

/// Basis points divisor for percentage calculations
///
/// 1 basis point = 0.01%, so 10,000 basis points = 100%. All fee math in
/// the program multiplies into u128 and divides by this constant,
/// truncating toward zero.
pub const FEE_BASIS_POINTS_DIVISOR: u128 = 10_000;

/// Upper bound for any fee expressed in basis points (100%)
pub const MAX_FEE_BPS: u16 = 10_000;

/// Protocol fee applied until the admin updates the config (1%)
pub const DEFAULT_PROTOCOL_FEE_BPS: u16 = 100;

/// Per-user policy cap applied until the admin updates the config
pub const DEFAULT_MAX_POLICIES_PER_USER: u32 = 10;

/// Floor for `PaymentFrequency::Custom` intervals (1 hour)
///
/// Anything shorter would let a policy drain its full delegated allowance
/// within a handful of blocks before the owner can react.
pub const MIN_CUSTOM_INTERVAL_SECONDS: u64 = 3_600;

/// Seconds in a day, the `Daily` frequency interval
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Seconds in a week, the `Weekly` frequency interval
pub const SECONDS_PER_WEEK: i64 = 604_800;
