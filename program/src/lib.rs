//! Recurring Payments Program
//!
//! A Solana-native recurring payments protocol built on delegated SPL
//! token transfers. Users approve a program-owned delegate PDA once;
//! payment policies then execute on schedule without further user
//! signatures, constrained entirely by on-chain checks rather than by any
//! off-chain scheduler's trustworthiness.
//!
//! ## Core Features
//! - Per-(owner, mint) payment accounts with bounded policy counts
//! - Subscription policies with calendar-aware schedules
//! - Registered payment gateways with per-gateway fee shares
//! - Protocol/gateway fee splitting on every execution
//! - Owner-controlled pause/resume and deletion of policies
//! - Emergency pause and admin-gated configuration

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(unexpected_cfgs)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::needless_pass_by_value)] // Anchor handlers must take owned Context by design
#![allow(clippy::unnecessary_wraps)] // Anchor handlers return Result<()> for consistency
#![allow(deprecated)] // Anchor framework uses deprecated AccountInfo::realloc internally

use anchor_lang::prelude::*;

mod change_payment_policy_status;
pub mod constants;
mod create_payment_gateway;
mod create_payment_policy;
mod create_user_payment;
mod delete_payment_policy;
pub mod errors;
pub mod events;
mod execute_payment;
mod initialize;
mod pause;
pub mod schedule;
mod set_gateway_status;
pub mod state;
mod unpause;
mod update_config;
pub mod utils;

use change_payment_policy_status::*;
use create_payment_gateway::*;
use create_payment_policy::*;
use create_user_payment::*;
use delete_payment_policy::*;
use execute_payment::*;
use initialize::*;
use pause::*;
use set_gateway_status::*;
use unpause::*;
use update_config::*;

declare_id!("TRibg8W8zmPHQqWtyAD1rEBRXEdyU13Mu6qX1Sg42tJ");

#[program]
pub mod recurring_payments {
    use super::*;

    /// Initialize the global program configuration
    ///
    /// The signer must be the program's upgrade authority and becomes the
    /// admin and initial protocol fee recipient. Fee and policy-count
    /// defaults apply until the admin updates them.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config account already exists
    /// - The signer is not the program's upgrade authority
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        initialize::handler(ctx)
    }

    /// Update the global configuration
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the config admin
    /// - `protocol_fee_bps` exceeds 10,000
    pub fn update_config(ctx: Context<UpdateConfig>, args: UpdateConfigArgs) -> Result<()> {
        update_config::handler(ctx, args)
    }

    /// Engage the emergency pause
    ///
    /// Disables all user-facing operations while admin operations remain
    /// available for incident response.
    ///
    /// # Errors
    /// Returns an error if the caller is not the config admin.
    pub fn pause(ctx: Context<Pause>) -> Result<()> {
        pause::handler(ctx)
    }

    /// Release the emergency pause
    ///
    /// # Errors
    /// Returns an error if the caller is not the config admin.
    pub fn unpause(ctx: Context<Unpause>) -> Result<()> {
        unpause::handler(ctx)
    }

    /// Create the per-(owner, mint) payment account
    ///
    /// # Errors
    /// Returns an error if:
    /// - The account already exists for this owner and mint
    /// - The token account is not owned by the signer or has a different
    ///   mint
    /// - The program is paused
    pub fn create_user_payment(ctx: Context<CreateUserPayment>) -> Result<()> {
        create_user_payment::handler(ctx)
    }

    /// Register a payment gateway for an authority
    ///
    /// Admin-only. The gateway starts active with a zero processed
    /// counter.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the config admin
    /// - `gateway_fee_bps` exceeds 10,000
    /// - A gateway already exists for this authority
    pub fn create_payment_gateway(
        ctx: Context<CreatePaymentGateway>,
        gateway_fee_bps: u16,
        name: [u8; 32],
        url: [u8; 64],
    ) -> Result<()> {
        create_payment_gateway::handler(ctx, gateway_fee_bps, name, url)
    }

    /// Toggle a gateway's active flag
    ///
    /// Callable by the gateway authority or the config admin. Policies
    /// referencing an inactive gateway fail execution until it is
    /// reactivated.
    ///
    /// # Errors
    /// Returns an error if the caller is neither the gateway authority
    /// nor the config admin.
    pub fn set_gateway_status(ctx: Context<SetGatewayStatus>, is_active: bool) -> Result<()> {
        set_gateway_status::handler(ctx, is_active)
    }

    /// Create a payment policy under the signer's user payment account
    ///
    /// # Errors
    /// Returns an error if:
    /// - The policy amount is zero or `max_renewals` is `Some(0)`
    /// - A custom interval is below the one-hour floor
    /// - The per-user policy cap is reached
    /// - The gateway is inactive
    /// - A policy with this id already exists (PDA collision)
    /// - The program is paused
    pub fn create_payment_policy(
        ctx: Context<CreatePaymentPolicy>,
        policy_id: u32,
        policy_type: state::PolicyType,
        memo: [u8; 64],
    ) -> Result<()> {
        create_payment_policy::handler(ctx, policy_id, policy_type, memo)
    }

    /// Switch a policy between Active and Paused
    ///
    /// Owner-only; the PDA chain from the signing owner to the policy
    /// enforces ownership. Transitions to the current status are
    /// rejected.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The policy does not belong to the signer
    /// - The requested status equals the current status
    pub fn change_payment_policy_status(
        ctx: Context<ChangePaymentPolicyStatus>,
        policy_id: u32,
        new_status: state::PaymentStatus,
    ) -> Result<()> {
        change_payment_policy_status::handler(ctx, policy_id, new_status)
    }

    /// Delete a payment policy and reclaim its rent
    ///
    /// Owner-only. Decrements the parent account's policy count by
    /// exactly one and closes the policy account.
    ///
    /// # Errors
    /// Returns an error if the policy does not belong to the signer.
    pub fn delete_payment_policy(
        ctx: Context<DeletePaymentPolicy>,
        policy_id: u32,
    ) -> Result<()> {
        delete_payment_policy::handler(ctx, policy_id)
    }

    /// Execute a due payment, splitting protocol and gateway fees
    ///
    /// Callable by the gateway authority or the policy owner. Transfers
    /// are signed by the payments delegate PDA; all three legs settle
    /// atomically or the instruction fails with no partial state change.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The program is paused or the gateway is inactive
    /// - The policy is paused or the payment is not yet due
    /// - The token account has no (or the wrong) delegate
    /// - The delegated allowance or balance cannot cover the amount
    pub fn execute_payment(ctx: Context<ExecutePayment>) -> Result<()> {
        execute_payment::handler(ctx)
    }
}
