use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::constants::{CONFIG_SEED, USER_PAYMENT_SEED};
use crate::errors::RecurringPaymentsError;
use crate::events::UserPaymentCreated;
use crate::state::{ProgramConfig, UserPayment};

#[derive(Accounts)]
pub struct CreateUserPayment<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = UserPayment::SIZE,
        seeds = [USER_PAYMENT_SEED, owner.key().as_ref(), token_mint.key().as_ref()],
        bump
    )]
    pub user_payment: Account<'info, UserPayment>,

    #[account(
        constraint = token_account.owner == owner.key() @ RecurringPaymentsError::Unauthorized,
        constraint = token_account.mint == token_mint.key()
    )]
    pub token_account: Account<'info, TokenAccount>,

    pub token_mint: Account<'info, Mint>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        constraint = !config.emergency_pause @ RecurringPaymentsError::ProgramPaused
    )]
    pub config: Account<'info, ProgramConfig>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateUserPayment>) -> Result<()> {
    let user_payment = &mut ctx.accounts.user_payment;
    let clock = Clock::get()?;

    user_payment.owner = ctx.accounts.owner.key();
    user_payment.token_account = ctx.accounts.token_account.key();
    user_payment.token_mint = ctx.accounts.token_mint.key();
    user_payment.active_policies_count = 0;
    user_payment.created_at = clock.unix_timestamp;
    user_payment.updated_at = clock.unix_timestamp;
    user_payment.is_active = true;
    user_payment.bump = ctx.bumps.user_payment;
    user_payment.padding = [0u8; 256];

    emit!(UserPaymentCreated {
        user_payment: user_payment.key(),
        owner: user_payment.owner,
        token_mint: user_payment.token_mint,
        timestamp: clock.unix_timestamp,
    });

    msg!("User payment account created for: {}", user_payment.owner);

    Ok(())
}
