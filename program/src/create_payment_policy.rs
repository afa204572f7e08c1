use anchor_lang::prelude::*;

use crate::constants::{
    CONFIG_SEED, GATEWAY_SEED, MIN_CUSTOM_INTERVAL_SECONDS, PAYMENT_POLICY_SEED, USER_PAYMENT_SEED,
};
use crate::errors::RecurringPaymentsError;
use crate::events::PolicyCreated;
use crate::state::{
    PaymentFrequency, PaymentGateway, PaymentPolicy, PaymentStatus, PolicyType, ProgramConfig,
    UserPayment,
};

#[derive(Accounts)]
#[instruction(policy_id: u32)]
pub struct CreatePaymentPolicy<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [USER_PAYMENT_SEED, user.key().as_ref(), token_mint.key().as_ref()],
        bump = user_payment.bump,
        constraint = user_payment.owner == user.key() @ RecurringPaymentsError::Unauthorized,
    )]
    pub user_payment: Account<'info, UserPayment>,

    /// CHECK: Wallet whose token account will receive payments; stored,
    /// validated against the destination token account at execution time
    pub recipient: UncheckedAccount<'info>,

    /// CHECK: Mint of the payment token, only used as a PDA seed here
    pub token_mint: UncheckedAccount<'info>,

    #[account(
        seeds = [GATEWAY_SEED, gateway.authority.as_ref()],
        bump = gateway.bump,
        constraint = gateway.is_active @ RecurringPaymentsError::GatewayInactive,
    )]
    pub gateway: Account<'info, PaymentGateway>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        constraint = !config.emergency_pause @ RecurringPaymentsError::ProgramPaused,
    )]
    pub config: Account<'info, ProgramConfig>,

    #[account(
        init,
        payer = user,
        space = PaymentPolicy::SIZE,
        seeds = [
            PAYMENT_POLICY_SEED,
            user_payment.key().as_ref(),
            policy_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub payment_policy: Account<'info, PaymentPolicy>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreatePaymentPolicy>,
    policy_id: u32,
    policy_type: PolicyType,
    memo: [u8; 64],
) -> Result<()> {
    let config = &ctx.accounts.config;
    let user_payment = &mut ctx.accounts.user_payment;
    let clock = Clock::get()?;

    validate_policy_type(&policy_type)?;

    require!(
        user_payment.active_policies_count < config.max_policies_per_user,
        RecurringPaymentsError::MaxPoliciesReached
    );

    let mut policy_type = policy_type;
    policy_type.normalize_padding();
    // A non-positive due date means "due now": the first execution
    // becomes valid at creation time.
    if policy_type.next_payment_due() <= 0 {
        policy_type.set_next_payment_due(clock.unix_timestamp);
    }

    let payment_policy = &mut ctx.accounts.payment_policy;
    payment_policy.user_payment = user_payment.key();
    payment_policy.recipient = ctx.accounts.recipient.key();
    payment_policy.gateway = ctx.accounts.gateway.key();
    payment_policy.policy_type = policy_type;
    payment_policy.status = PaymentStatus::Active;
    payment_policy.memo = memo;
    payment_policy.total_paid = 0;
    payment_policy.payment_count = 0;
    payment_policy.created_at = clock.unix_timestamp;
    payment_policy.updated_at = clock.unix_timestamp;
    payment_policy.policy_id = policy_id;
    payment_policy.bump = ctx.bumps.payment_policy;
    payment_policy.padding = [0u8; 256];

    user_payment.active_policies_count = user_payment
        .active_policies_count
        .checked_add(1)
        .ok_or(RecurringPaymentsError::ArithmeticError)?;
    user_payment.updated_at = clock.unix_timestamp;

    emit!(PolicyCreated {
        payment_policy: payment_policy.key(),
        user_payment: user_payment.key(),
        recipient: payment_policy.recipient,
        gateway: payment_policy.gateway,
        policy_id,
        amount: payment_policy.policy_type.amount(),
        next_payment_due: payment_policy.policy_type.next_payment_due(),
    });

    msg!(
        "Payment policy created with ID: {}, recipient: {}, next payment due: {}",
        policy_id,
        payment_policy.recipient,
        payment_policy.policy_type.next_payment_due()
    );

    Ok(())
}

/// Reject policy terms the program could never execute sensibly
fn validate_policy_type(policy_type: &PolicyType) -> Result<()> {
    require!(
        policy_type.amount() > 0,
        RecurringPaymentsError::InvalidAmount
    );

    // A renewal cap of zero would create a policy that can never execute.
    require!(
        policy_type.max_renewals() != Some(0),
        RecurringPaymentsError::InvalidAmount
    );

    if let PaymentFrequency::Custom(seconds) = policy_type.payment_frequency() {
        require!(
            seconds >= MIN_CUSTOM_INTERVAL_SECONDS,
            RecurringPaymentsError::InvalidInterval
        );
    }

    Ok(())
}
