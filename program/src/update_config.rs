use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, MAX_FEE_BPS};
use crate::errors::RecurringPaymentsError;
use crate::events::ConfigUpdated;
use crate::state::ProgramConfig;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct UpdateConfigArgs {
    /// New destination owner for protocol fee transfers
    pub fee_recipient: Pubkey,
    /// New protocol fee in basis points (0-10,000)
    pub protocol_fee_bps: u16,
    /// New cap on concurrently existing policies per user
    pub max_policies_per_user: u32,
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = admin @ RecurringPaymentsError::Unauthorized
    )]
    pub config: Account<'info, ProgramConfig>,

    pub admin: Signer<'info>,
}

pub fn handler(ctx: Context<UpdateConfig>, args: UpdateConfigArgs) -> Result<()> {
    require!(
        args.protocol_fee_bps <= MAX_FEE_BPS,
        RecurringPaymentsError::InvalidAmount
    );

    let config = &mut ctx.accounts.config;
    config.fee_recipient = args.fee_recipient;
    config.protocol_fee_bps = args.protocol_fee_bps;
    config.max_policies_per_user = args.max_policies_per_user;

    emit!(ConfigUpdated {
        fee_recipient: config.fee_recipient,
        protocol_fee_bps: config.protocol_fee_bps,
        max_policies_per_user: config.max_policies_per_user,
        updated_by: ctx.accounts.admin.key(),
    });

    Ok(())
}
