use anchor_lang::prelude::*;

use crate::constants::{PAYMENT_POLICY_SEED, USER_PAYMENT_SEED};
use crate::errors::RecurringPaymentsError;
use crate::events::PolicyStatusChanged;
use crate::state::{PaymentPolicy, PaymentStatus, UserPayment};

#[derive(Accounts)]
#[instruction(policy_id: u32)]
pub struct ChangePaymentPolicyStatus<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    // The PDA chain owner -> user_payment -> payment_policy is the
    // ownership proof: the policy seeds bind it to this user_payment,
    // whose seeds bind it to the signing owner.
    #[account(
        seeds = [USER_PAYMENT_SEED, owner.key().as_ref(), token_mint.key().as_ref()],
        bump = user_payment.bump,
    )]
    pub user_payment: Account<'info, UserPayment>,

    /// CHECK: Mint of the payment token, only used as a PDA seed here
    pub token_mint: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [
            PAYMENT_POLICY_SEED,
            user_payment.key().as_ref(),
            policy_id.to_le_bytes().as_ref()
        ],
        bump = payment_policy.bump,
    )]
    pub payment_policy: Account<'info, PaymentPolicy>,
}

pub fn handler(
    ctx: Context<ChangePaymentPolicyStatus>,
    _policy_id: u32,
    new_status: PaymentStatus,
) -> Result<()> {
    let payment_policy = &mut ctx.accounts.payment_policy;
    let clock = Clock::get()?;

    // Active <-> Paused are the only states, so the only invalid request
    // is a no-op transition.
    require!(
        payment_policy.status != new_status,
        RecurringPaymentsError::InvalidPolicyStatusTransition
    );

    payment_policy.status = new_status;
    payment_policy.updated_at = clock.unix_timestamp;

    emit!(PolicyStatusChanged {
        payment_policy: payment_policy.key(),
        owner: ctx.accounts.owner.key(),
        new_status,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Payment policy {} status changed to {:?}",
        payment_policy.policy_id,
        new_status
    );

    Ok(())
}
