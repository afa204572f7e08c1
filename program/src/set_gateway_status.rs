use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, GATEWAY_SEED};
use crate::errors::RecurringPaymentsError;
use crate::events::GatewayStatusChanged;
use crate::state::{PaymentGateway, ProgramConfig};

#[derive(Accounts)]
pub struct SetGatewayStatus<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, ProgramConfig>,

    #[account(
        mut,
        seeds = [GATEWAY_SEED, gateway.authority.as_ref()],
        bump = gateway.bump
    )]
    pub gateway: Account<'info, PaymentGateway>,

    /// Either the gateway authority or the config admin
    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<SetGatewayStatus>, is_active: bool) -> Result<()> {
    let gateway = &mut ctx.accounts.gateway;
    let config = &ctx.accounts.config;

    let is_gateway_authority = ctx.accounts.authority.key() == gateway.authority;
    let is_admin = ctx.accounts.authority.key() == config.admin;

    require!(
        is_gateway_authority || is_admin,
        RecurringPaymentsError::Unauthorized
    );

    let changed_by = if is_admin { "admin" } else { "authority" };

    gateway.is_active = is_active;

    emit!(GatewayStatusChanged {
        gateway: gateway.key(),
        is_active,
        changed_by: changed_by.to_string(),
    });

    msg!(
        "Gateway status updated: gateway={}, active={}, changed_by={}",
        gateway.key(),
        is_active,
        changed_by
    );

    Ok(())
}
