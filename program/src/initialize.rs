use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable::{self, UpgradeableLoaderState};

use crate::constants::{CONFIG_SEED, DEFAULT_MAX_POLICIES_PER_USER, DEFAULT_PROTOCOL_FEE_BPS};
use crate::errors::RecurringPaymentsError;
use crate::events::ConfigInitialized;
use crate::state::ProgramConfig;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = ProgramConfig::SIZE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, ProgramConfig>,

    /// Program data account for upgrade authority validation
    /// CHECK: Validated in handler by deserializing and checking upgrade authority
    pub program_data: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Gets the expected program data address for the current program
fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    let (program_data_address, _) =
        Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id());
    program_data_address
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    // Only the upgrade authority may initialize; otherwise anyone could
    // front-run deployment and install themselves as admin.
    let expected_program_data = get_program_data_address(ctx.program_id);
    require!(
        ctx.accounts.program_data.key() == expected_program_data,
        RecurringPaymentsError::InvalidProgramData
    );

    let program_data_account = ctx.accounts.program_data.to_account_info();
    let program_data_bytes = program_data_account.try_borrow_data()?;

    let program_data_state: UpgradeableLoaderState = bincode::deserialize(&program_data_bytes)
        .map_err(|_| RecurringPaymentsError::InvalidProgramData)?;

    let UpgradeableLoaderState::ProgramData {
        upgrade_authority_address: upgrade_authority,
        ..
    } = program_data_state
    else {
        return Err(RecurringPaymentsError::InvalidProgramData.into());
    };

    let upgrade_authority = upgrade_authority.ok_or(RecurringPaymentsError::Unauthorized)?;
    require!(
        ctx.accounts.admin.key() == upgrade_authority,
        RecurringPaymentsError::Unauthorized
    );

    let clock = Clock::get()?;
    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.fee_recipient = ctx.accounts.admin.key();
    config.protocol_fee_bps = DEFAULT_PROTOCOL_FEE_BPS;
    config.max_policies_per_user = DEFAULT_MAX_POLICIES_PER_USER;
    config.emergency_pause = false;
    config.bump = ctx.bumps.config;
    config.padding = [0u8; 256];

    emit!(ConfigInitialized {
        admin: config.admin,
        fee_recipient: config.fee_recipient,
        protocol_fee_bps: config.protocol_fee_bps,
        max_policies_per_user: config.max_policies_per_user,
        timestamp: clock.unix_timestamp,
    });

    msg!("Program initialized with admin: {}", config.admin);

    Ok(())
}
