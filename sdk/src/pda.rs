//! Program Derived Address (PDA) computation utilities
//!
//! Every protocol account is deterministically addressed from seeds plus
//! the program id; these helpers mirror the on-chain derivations exactly.
//! The plain functions use the crate-level [`crate::program_id`]; the
//! `*_with_program_id` variants exist for localnet deployments under a
//! different id.

use anchor_client::solana_sdk::pubkey::Pubkey;

use crate::program_id;

/// Compute the singleton `ProgramConfig` PDA
#[must_use]
pub fn config() -> (Pubkey, u8) {
    config_with_program_id(&program_id())
}

/// Compute the singleton `ProgramConfig` PDA with a custom program ID
#[must_use]
pub fn config_with_program_id(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"config"], program_id)
}

/// Compute a `PaymentGateway` PDA for a gateway authority
#[must_use]
pub fn gateway(authority: &Pubkey) -> (Pubkey, u8) {
    gateway_with_program_id(authority, &program_id())
}

/// Compute a `PaymentGateway` PDA with a custom program ID
#[must_use]
pub fn gateway_with_program_id(authority: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"gateway", authority.as_ref()], program_id)
}

/// Compute the `UserPayment` PDA for an (owner, mint) pair
#[must_use]
pub fn user_payment(owner: &Pubkey, token_mint: &Pubkey) -> (Pubkey, u8) {
    user_payment_with_program_id(owner, token_mint, &program_id())
}

/// Compute the `UserPayment` PDA with a custom program ID
#[must_use]
pub fn user_payment_with_program_id(
    owner: &Pubkey,
    token_mint: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[b"user_payment", owner.as_ref(), token_mint.as_ref()],
        program_id,
    )
}

/// Compute a `PaymentPolicy` PDA
///
/// The policy id enters the seeds as 4 little-endian bytes, matching the
/// on-chain `policy_id.to_le_bytes()` derivation.
#[must_use]
pub fn payment_policy(user_payment: &Pubkey, policy_id: u32) -> (Pubkey, u8) {
    payment_policy_with_program_id(user_payment, policy_id, &program_id())
}

/// Compute a `PaymentPolicy` PDA with a custom program ID
#[must_use]
pub fn payment_policy_with_program_id(
    user_payment: &Pubkey,
    policy_id: u32,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            b"payment_policy",
            user_payment.as_ref(),
            policy_id.to_le_bytes().as_ref(),
        ],
        program_id,
    )
}

/// Compute the global payments delegate PDA
///
/// A single global delegate is shared by all gateways and policies:
/// users approve it once per token account, and every policy on that
/// account can then execute against the same approval.
#[must_use]
pub fn payments_delegate() -> (Pubkey, u8) {
    payments_delegate_with_program_id(&program_id())
}

/// Compute the global payments delegate PDA with a custom program ID
#[must_use]
pub fn payments_delegate_with_program_id(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"payments"], program_id)
}
