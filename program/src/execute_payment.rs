use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{
    CONFIG_SEED, GATEWAY_SEED, PAYMENTS_SEED, PAYMENT_POLICY_SEED, USER_PAYMENT_SEED,
};
use crate::errors::RecurringPaymentsError;
use crate::events::{LowAllowanceWarning, PaymentRecord};
use crate::schedule;
use crate::state::{PaymentGateway, PaymentPolicy, PaymentStatus, ProgramConfig, UserPayment};
use crate::utils::fee_breakdown;

#[derive(Accounts)]
pub struct ExecutePayment<'info> {
    /// Transaction caller: the gateway authority or the policy owner
    pub executor: Signer<'info>,

    /// CHECK: Program-derived delegate authority for token transfers;
    /// holds no data, the seeds constraint is the whole validation
    #[account(
        seeds = [PAYMENTS_SEED],
        bump
    )]
    pub payments_delegate: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [
            PAYMENT_POLICY_SEED,
            payment_policy.user_payment.as_ref(),
            payment_policy.policy_id.to_le_bytes().as_ref()
        ],
        bump = payment_policy.bump,
    )]
    pub payment_policy: Box<Account<'info, PaymentPolicy>>,

    #[account(
        mut,
        seeds = [
            USER_PAYMENT_SEED,
            user_payment.owner.as_ref(),
            user_payment.token_mint.as_ref()
        ],
        bump = user_payment.bump,
        constraint = user_payment.is_active @ RecurringPaymentsError::Unauthorized,
        constraint = payment_policy.user_payment == user_payment.key()
            @ RecurringPaymentsError::PolicyNotFound,
    )]
    pub user_payment: Box<Account<'info, UserPayment>>,

    #[account(
        mut,
        seeds = [GATEWAY_SEED, gateway.authority.as_ref()],
        bump = gateway.bump,
        constraint = gateway.key() == payment_policy.gateway
            @ RecurringPaymentsError::Unauthorized,
        constraint = gateway.is_active @ RecurringPaymentsError::GatewayInactive,
    )]
    pub gateway: Box<Account<'info, PaymentGateway>>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        constraint = !config.emergency_pause @ RecurringPaymentsError::ProgramPaused,
    )]
    pub config: Box<Account<'info, ProgramConfig>>,

    #[account(
        mut,
        constraint = user_token_account.key() == user_payment.token_account
            @ RecurringPaymentsError::Unauthorized,
        constraint = user_token_account.mint == user_payment.token_mint
            @ RecurringPaymentsError::Unauthorized,
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = recipient_token_account.mint == user_payment.token_mint
            @ RecurringPaymentsError::Unauthorized,
        constraint = recipient_token_account.owner == payment_policy.recipient
            @ RecurringPaymentsError::Unauthorized,
    )]
    pub recipient_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = gateway_fee_account.mint == user_payment.token_mint
            @ RecurringPaymentsError::Unauthorized,
        constraint = gateway_fee_account.owner == gateway.fee_recipient
            @ RecurringPaymentsError::Unauthorized,
    )]
    pub gateway_fee_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = protocol_fee_account.mint == user_payment.token_mint
            @ RecurringPaymentsError::Unauthorized,
        constraint = protocol_fee_account.owner == config.fee_recipient
            @ RecurringPaymentsError::Unauthorized,
    )]
    pub protocol_fee_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[allow(clippy::too_many_lines)]
pub fn handler(ctx: Context<ExecutePayment>) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    // Authorization: executions may be triggered by the gateway that the
    // policy is routed through, or by the owner paying manually.
    let executor = ctx.accounts.executor.key();
    require!(
        executor == ctx.accounts.gateway.authority
            || executor == ctx.accounts.user_payment.owner,
        RecurringPaymentsError::Unauthorized
    );

    require!(
        ctx.accounts.payment_policy.status == PaymentStatus::Active,
        RecurringPaymentsError::PolicyPaused
    );

    // Boundary: a payment due exactly now is executable.
    let next_payment_due = ctx.accounts.payment_policy.policy_type.next_payment_due();
    require!(now >= next_payment_due, RecurringPaymentsError::PaymentNotDue);

    // The delegate approval is the only authority we have over the user's
    // funds; without it (or with someone else's delegate) there is
    // nothing to execute with.
    let delegate: Option<Pubkey> = ctx.accounts.user_token_account.delegate.into();
    require!(
        delegate == Some(ctx.accounts.payments_delegate.key()),
        RecurringPaymentsError::NoDelegateSet
    );

    let amount = ctx.accounts.payment_policy.policy_type.amount();

    require!(
        ctx.accounts.user_token_account.delegated_amount >= amount,
        RecurringPaymentsError::InsufficientDelegatedAmount
    );
    require!(
        ctx.accounts.user_token_account.amount >= amount,
        RecurringPaymentsError::InsufficientBalance
    );

    let split = fee_breakdown(
        amount,
        ctx.accounts.config.protocol_fee_bps,
        ctx.accounts.gateway.gateway_fee_bps,
    )?;

    let delegate_bump = ctx.bumps.payments_delegate;
    let delegate_seeds: &[&[&[u8]]] = &[&[PAYMENTS_SEED, &[delegate_bump]]];

    // Three delegate-signed legs; each is skipped when zero. The runtime
    // rolls back every leg if any one fails.
    if split.recipient_amount > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.user_token_account.to_account_info(),
            to: ctx.accounts.recipient_token_account.to_account_info(),
            authority: ctx.accounts.payments_delegate.to_account_info(),
        };
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                cpi_accounts,
                delegate_seeds,
            ),
            split.recipient_amount,
        )?;
    }

    if split.gateway_fee > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.user_token_account.to_account_info(),
            to: ctx.accounts.gateway_fee_account.to_account_info(),
            authority: ctx.accounts.payments_delegate.to_account_info(),
        };
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                cpi_accounts,
                delegate_seeds,
            ),
            split.gateway_fee,
        )?;
    }

    if split.protocol_fee > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.user_token_account.to_account_info(),
            to: ctx.accounts.protocol_fee_account.to_account_info(),
            authority: ctx.accounts.payments_delegate.to_account_info(),
        };
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                cpi_accounts,
                delegate_seeds,
            ),
            split.protocol_fee,
        )?;
    }

    let payment_policy = &mut ctx.accounts.payment_policy;
    let user_payment = &mut ctx.accounts.user_payment;
    let gateway = &mut ctx.accounts.gateway;

    payment_policy.total_paid = payment_policy
        .total_paid
        .checked_add(amount)
        .ok_or(RecurringPaymentsError::ArithmeticError)?;
    payment_policy.payment_count = payment_policy
        .payment_count
        .checked_add(1)
        .ok_or(RecurringPaymentsError::ArithmeticError)?;

    let frequency = payment_policy.policy_type.payment_frequency();
    let new_due = schedule::advance(next_payment_due, frequency, now)?;
    payment_policy.policy_type.set_next_payment_due(new_due);
    payment_policy.updated_at = now;

    // Renewal exhaustion: a one-shot policy, or one that just hit its
    // renewal cap, parks in Paused. The owner can resume or delete it.
    let exhausted = !payment_policy.policy_type.auto_renew()
        || payment_policy
            .policy_type
            .max_renewals()
            .is_some_and(|max| payment_policy.payment_count >= max);
    if exhausted {
        payment_policy.status = PaymentStatus::Paused;
    }

    gateway.total_processed = gateway
        .total_processed
        .checked_add(amount)
        .ok_or(RecurringPaymentsError::ArithmeticError)?;

    user_payment.updated_at = now;

    emit!(PaymentRecord {
        payment_policy: payment_policy.key(),
        gateway: gateway.key(),
        amount,
        timestamp: now,
        memo: payment_policy.memo,
        record_id: payment_policy.payment_count,
    });

    // The transfers just burned `amount` of allowance; warn off-chain
    // systems when less than one full cycle of headroom remains beyond
    // the next payment.
    let remaining_allowance = ctx
        .accounts
        .user_token_account
        .delegated_amount
        .saturating_sub(amount);
    let recommended_allowance = amount.saturating_mul(2);
    if remaining_allowance < recommended_allowance {
        emit!(LowAllowanceWarning {
            payment_policy: ctx.accounts.payment_policy.key(),
            owner: ctx.accounts.user_payment.owner,
            remaining_allowance,
            recommended_allowance,
            amount,
        });
    }

    msg!(
        "Payment executed: {} to recipient, {} gateway fee, {} protocol fee",
        split.recipient_amount,
        split.gateway_fee,
        split.protocol_fee
    );

    Ok(())
}
