use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, GATEWAY_SEED, MAX_FEE_BPS};
use crate::errors::RecurringPaymentsError;
use crate::events::GatewayRegistered;
use crate::state::{PaymentGateway, ProgramConfig};

#[derive(Accounts)]
pub struct CreatePaymentGateway<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    /// CHECK: The authority that will own the gateway; stored, never read
    pub authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = admin,
        space = PaymentGateway::SIZE,
        seeds = [GATEWAY_SEED, authority.key().as_ref()],
        bump
    )]
    pub gateway: Account<'info, PaymentGateway>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = admin @ RecurringPaymentsError::Unauthorized
    )]
    pub config: Account<'info, ProgramConfig>,

    /// CHECK: Wallet whose token accounts will receive gateway fees
    pub fee_recipient: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreatePaymentGateway>,
    gateway_fee_bps: u16,
    name: [u8; 32],
    url: [u8; 64],
) -> Result<()> {
    require!(
        gateway_fee_bps <= MAX_FEE_BPS,
        RecurringPaymentsError::InvalidAmount
    );

    let gateway = &mut ctx.accounts.gateway;
    let clock = Clock::get()?;

    gateway.authority = ctx.accounts.authority.key();
    gateway.fee_recipient = ctx.accounts.fee_recipient.key();
    gateway.gateway_fee_bps = gateway_fee_bps;
    gateway.is_active = true;
    gateway.total_processed = 0;
    gateway.created_at = clock.unix_timestamp;
    gateway.bump = ctx.bumps.gateway;
    gateway.name = name;
    gateway.url = url;
    gateway.padding = [0u8; 160];

    emit!(GatewayRegistered {
        gateway: gateway.key(),
        authority: gateway.authority,
        fee_recipient: gateway.fee_recipient,
        gateway_fee_bps,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Payment gateway created with authority: {}, fee: {} bps",
        gateway.authority,
        gateway.gateway_fee_bps
    );

    Ok(())
}
