use anchor_lang::prelude::*;

use crate::constants::{PAYMENT_POLICY_SEED, USER_PAYMENT_SEED};
use crate::errors::RecurringPaymentsError;
use crate::events::PolicyClosed;
use crate::state::{PaymentPolicy, UserPayment};

#[derive(Accounts)]
#[instruction(policy_id: u32)]
pub struct DeletePaymentPolicy<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
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
        close = owner
    )]
    pub payment_policy: Account<'info, PaymentPolicy>,
}

pub fn handler(ctx: Context<DeletePaymentPolicy>, policy_id: u32) -> Result<()> {
    let user_payment = &mut ctx.accounts.user_payment;
    let payment_policy = &ctx.accounts.payment_policy;
    let clock = Clock::get()?;

    user_payment.active_policies_count = user_payment
        .active_policies_count
        .checked_sub(1)
        .ok_or(RecurringPaymentsError::ArithmeticError)?;
    user_payment.updated_at = clock.unix_timestamp;

    // Emit before Anchor's close constraint zeroes the account and
    // returns the rent to the owner.
    emit!(PolicyClosed {
        payment_policy: payment_policy.key(),
        user_payment: user_payment.key(),
        owner: ctx.accounts.owner.key(),
        policy_id,
    });

    msg!("Payment policy {} deleted", policy_id);

    Ok(())
}
