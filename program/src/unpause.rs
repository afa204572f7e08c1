use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::errors::RecurringPaymentsError;
use crate::events::ProgramPauseToggled;
use crate::state::ProgramConfig;

#[derive(Accounts)]
pub struct Unpause<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = admin @ RecurringPaymentsError::Unauthorized
    )]
    pub config: Account<'info, ProgramConfig>,

    pub admin: Signer<'info>,
}

pub fn handler(ctx: Context<Unpause>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.emergency_pause = false;

    let clock = Clock::get()?;
    emit!(ProgramPauseToggled {
        paused: false,
        authority: ctx.accounts.admin.key(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Program unpaused by admin: {}", ctx.accounts.admin.key());

    Ok(())
}
