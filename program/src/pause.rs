use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::errors::RecurringPaymentsError;
use crate::events::ProgramPauseToggled;
use crate::state::ProgramConfig;

#[derive(Accounts)]
pub struct Pause<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = admin @ RecurringPaymentsError::Unauthorized
    )]
    pub config: Account<'info, ProgramConfig>,

    pub admin: Signer<'info>,
}

/// Engage the emergency pause
///
/// User-facing instructions gate on `config.emergency_pause`; admin
/// instructions stay available so an incident can be worked while
/// executions are frozen.
pub fn handler(ctx: Context<Pause>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.emergency_pause = true;

    let clock = Clock::get()?;
    emit!(ProgramPauseToggled {
        paused: true,
        authority: ctx.accounts.admin.key(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Program paused by admin: {}", ctx.accounts.admin.key());

    Ok(())
}
