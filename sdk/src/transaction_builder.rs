//! Transaction building utilities for recurring payment flows
//!
//! Builders produce ready-to-sign [`Instruction`]s with the account
//! ordering the program expects and the Anchor discriminators the
//! deployed IDL pins. The policy-creation flow pairs a delegate
//! `approve_checked` with the program instruction (approve → create), so
//! a single transaction both grants the allowance and opens the policy.

use anchor_client::solana_sdk::instruction::{AccountMeta, Instruction};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable;
use anchor_lang::system_program;

use crate::error::{Result, TributaryError};
use crate::program_types::{PaymentStatus, PolicyType, UpdateConfigArgs};
use crate::{pda, program_id};

/// Anchor instruction discriminators from the deployed IDL
///
/// sha256("global:<instruction_name>")[..8]; pinned as constants so the
/// SDK stays byte-compatible without a code generator in the loop.
pub mod discriminators {
    pub const INITIALIZE: [u8; 8] = [175, 175, 109, 31, 13, 152, 155, 237];
    pub const CREATE_USER_PAYMENT: [u8; 8] = [115, 54, 209, 72, 127, 194, 206, 49];
    pub const CREATE_PAYMENT_GATEWAY: [u8; 8] = [186, 227, 210, 95, 154, 36, 146, 9];
    pub const CREATE_PAYMENT_POLICY: [u8; 8] = [32, 50, 29, 251, 174, 23, 112, 121];
    pub const CHANGE_PAYMENT_POLICY_STATUS: [u8; 8] = [250, 83, 53, 119, 200, 114, 9, 132];
    pub const DELETE_PAYMENT_POLICY: [u8; 8] = [146, 180, 143, 169, 50, 40, 146, 86];
    pub const EXECUTE_PAYMENT: [u8; 8] = [86, 4, 7, 7, 120, 139, 232, 139];
    pub const UPDATE_CONFIG: [u8; 8] = [29, 158, 252, 191, 10, 83, 219, 99];
    pub const PAUSE: [u8; 8] = [211, 22, 221, 251, 74, 121, 193, 47];
    pub const UNPAUSE: [u8; 8] = [169, 144, 4, 38, 10, 141, 188, 255];
    pub const SET_GATEWAY_STATUS: [u8; 8] = [13, 174, 200, 91, 59, 241, 87, 0];
}

fn serialize_args<T: AnchorSerialize>(discriminator: [u8; 8], args: &T) -> Result<Vec<u8>> {
    let mut data = discriminator.to_vec();
    args.serialize(&mut data)
        .map_err(|e| TributaryError::Generic(format!("Failed to serialize args: {e}")))?;
    Ok(data)
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| TributaryError::Generic(format!("{field} is required")))
}

/// Builder for the `initialize` instruction
///
/// The signer must be the program's upgrade authority; it becomes the
/// admin and initial protocol fee recipient.
#[derive(Clone, Debug, Default)]
pub struct InitializeBuilder {
    admin: Option<Pubkey>,
    program_id: Option<Pubkey>,
}

impl InitializeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the admin (upgrade authority) signer
    #[must_use]
    pub const fn admin(mut self, admin: Pubkey) -> Self {
        self.admin = Some(admin);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the instruction
    pub fn build(self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or_else(program_id);
        let admin = required(self.admin, "admin")?;

        let (config, _) = pda::config_with_program_id(&program_id);
        let (program_data, _) =
            Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id());

        let accounts = vec![
            AccountMeta::new(admin, true),                    // admin (signer, payer)
            AccountMeta::new(config, false),                  // config (PDA)
            AccountMeta::new_readonly(program_data, false),   // program_data
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: discriminators::INITIALIZE.to_vec(),
        })
    }
}

/// Builder for the `create_user_payment` instruction
#[derive(Clone, Debug, Default)]
pub struct CreateUserPaymentBuilder {
    owner: Option<Pubkey>,
    token_account: Option<Pubkey>,
    token_mint: Option<Pubkey>,
    program_id: Option<Pubkey>,
}

impl CreateUserPaymentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the owner (signer and payer)
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the token account payments will be pulled from
    #[must_use]
    pub const fn token_account(mut self, token_account: Pubkey) -> Self {
        self.token_account = Some(token_account);
        self
    }

    /// Set the payment token mint
    #[must_use]
    pub const fn token_mint(mut self, token_mint: Pubkey) -> Self {
        self.token_mint = Some(token_mint);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the instruction
    pub fn build(self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or_else(program_id);
        let owner = required(self.owner, "owner")?;
        let token_account = required(self.token_account, "token_account")?;
        let token_mint = required(self.token_mint, "token_mint")?;

        let (user_payment, _) = pda::user_payment_with_program_id(&owner, &token_mint, &program_id);
        let (config, _) = pda::config_with_program_id(&program_id);

        let accounts = vec![
            AccountMeta::new(owner, true),                     // owner (signer, payer)
            AccountMeta::new(user_payment, false),             // user_payment (PDA)
            AccountMeta::new_readonly(token_account, false),   // token_account
            AccountMeta::new_readonly(token_mint, false),      // token_mint
            AccountMeta::new_readonly(config, false),          // config
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: discriminators::CREATE_USER_PAYMENT.to_vec(),
        })
    }
}

#[derive(AnchorSerialize)]
struct CreatePaymentGatewayArgs {
    gateway_fee_bps: u16,
    name: [u8; 32],
    url: [u8; 64],
}

/// Builder for the admin-only `create_payment_gateway` instruction
#[derive(Clone, Debug, Default)]
pub struct CreatePaymentGatewayBuilder {
    admin: Option<Pubkey>,
    authority: Option<Pubkey>,
    fee_recipient: Option<Pubkey>,
    gateway_fee_bps: Option<u16>,
    name: Option<[u8; 32]>,
    url: Option<[u8; 64]>,
    program_id: Option<Pubkey>,
}

impl CreatePaymentGatewayBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the config admin (signer and payer)
    #[must_use]
    pub const fn admin(mut self, admin: Pubkey) -> Self {
        self.admin = Some(admin);
        self
    }

    /// Set the authority that will own the gateway
    #[must_use]
    pub const fn authority(mut self, authority: Pubkey) -> Self {
        self.authority = Some(authority);
        self
    }

    /// Set the wallet receiving gateway fees
    #[must_use]
    pub const fn fee_recipient(mut self, fee_recipient: Pubkey) -> Self {
        self.fee_recipient = Some(fee_recipient);
        self
    }

    /// Set the gateway fee in basis points (0-10,000)
    #[must_use]
    pub const fn gateway_fee_bps(mut self, bps: u16) -> Self {
        self.gateway_fee_bps = Some(bps);
        self
    }

    /// Set the display name (zero-padded to 32 bytes)
    #[must_use]
    pub const fn name(mut self, name: [u8; 32]) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the service URL (zero-padded to 64 bytes)
    #[must_use]
    pub const fn url(mut self, url: [u8; 64]) -> Self {
        self.url = Some(url);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the instruction
    pub fn build(self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or_else(program_id);
        let admin = required(self.admin, "admin")?;
        let authority = required(self.authority, "authority")?;
        let fee_recipient = required(self.fee_recipient, "fee_recipient")?;
        let gateway_fee_bps = required(self.gateway_fee_bps, "gateway_fee_bps")?;

        crate::validation::validate_fee_bps(gateway_fee_bps)?;

        let (gateway, _) = pda::gateway_with_program_id(&authority, &program_id);
        let (config, _) = pda::config_with_program_id(&program_id);

        let args = CreatePaymentGatewayArgs {
            gateway_fee_bps,
            name: self.name.unwrap_or([0u8; 32]),
            url: self.url.unwrap_or([0u8; 64]),
        };

        let accounts = vec![
            AccountMeta::new(admin, true),                    // admin (signer, payer)
            AccountMeta::new_readonly(authority, false),      // authority
            AccountMeta::new(gateway, false),                 // gateway (PDA)
            AccountMeta::new_readonly(config, false),         // config
            AccountMeta::new_readonly(fee_recipient, false),  // fee_recipient
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: serialize_args(discriminators::CREATE_PAYMENT_GATEWAY, &args)?,
        })
    }
}

/// Builder for the `set_gateway_status` instruction
#[derive(Clone, Debug, Default)]
pub struct SetGatewayStatusBuilder {
    signer: Option<Pubkey>,
    gateway_authority: Option<Pubkey>,
    is_active: Option<bool>,
    program_id: Option<Pubkey>,
}

impl SetGatewayStatusBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signer (gateway authority or config admin)
    #[must_use]
    pub const fn signer(mut self, signer: Pubkey) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Set the authority the gateway PDA is derived from
    #[must_use]
    pub const fn gateway_authority(mut self, authority: Pubkey) -> Self {
        self.gateway_authority = Some(authority);
        self
    }

    /// Set the target active state
    #[must_use]
    pub const fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the instruction
    pub fn build(self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or_else(program_id);
        let signer = required(self.signer, "signer")?;
        let gateway_authority = required(self.gateway_authority, "gateway_authority")?;
        let is_active = required(self.is_active, "is_active")?;

        let (config, _) = pda::config_with_program_id(&program_id);
        let (gateway, _) = pda::gateway_with_program_id(&gateway_authority, &program_id);

        let accounts = vec![
            AccountMeta::new_readonly(config, false), // config
            AccountMeta::new(gateway, false),         // gateway
            AccountMeta::new_readonly(signer, true),  // authority (signer)
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: serialize_args(discriminators::SET_GATEWAY_STATUS, &is_active)?,
        })
    }
}

#[derive(AnchorSerialize)]
struct CreatePaymentPolicyArgs {
    policy_id: u32,
    policy_type: PolicyType,
    memo: [u8; 64],
}

/// Builder for policy creation (approve → create flow)
///
/// When an allowance is configured, the built transaction first approves
/// the global payments delegate for `allowance` base units via
/// `approve_checked`, then creates the policy — one atomic setup step.
#[derive(Clone, Debug, Default)]
pub struct CreatePaymentPolicyBuilder {
    owner: Option<Pubkey>,
    token_mint: Option<Pubkey>,
    recipient: Option<Pubkey>,
    gateway_authority: Option<Pubkey>,
    policy_id: Option<u32>,
    policy_type: Option<PolicyType>,
    memo: Option<[u8; 64]>,
    allowance: Option<u64>,
    mint_decimals: Option<u8>,
    token_account: Option<Pubkey>,
    program_id: Option<Pubkey>,
}

impl CreatePaymentPolicyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy owner (signer and payer)
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the payment token mint
    #[must_use]
    pub const fn token_mint(mut self, token_mint: Pubkey) -> Self {
        self.token_mint = Some(token_mint);
        self
    }

    /// Set the wallet receiving the net payments
    #[must_use]
    pub const fn recipient(mut self, recipient: Pubkey) -> Self {
        self.recipient = Some(recipient);
        self
    }

    /// Set the authority of the gateway the policy routes through
    #[must_use]
    pub const fn gateway_authority(mut self, authority: Pubkey) -> Self {
        self.gateway_authority = Some(authority);
        self
    }

    /// Set the client-assigned policy id
    #[must_use]
    pub const fn policy_id(mut self, policy_id: u32) -> Self {
        self.policy_id = Some(policy_id);
        self
    }

    /// Set the policy terms
    #[must_use]
    pub const fn policy_type(mut self, policy_type: PolicyType) -> Self {
        self.policy_type = Some(policy_type);
        self
    }

    /// Set the memo (zero-padded to 64 bytes)
    #[must_use]
    pub const fn memo(mut self, memo: [u8; 64]) -> Self {
        self.memo = Some(memo);
        self
    }

    /// Grant the payments delegate this allowance (in base units) as part
    /// of the transaction; requires `mint_decimals`
    #[must_use]
    pub const fn allowance(mut self, allowance: u64, mint_decimals: u8) -> Self {
        self.allowance = Some(allowance);
        self.mint_decimals = Some(mint_decimals);
        self
    }

    /// Override the token account holding the funds (defaults to the
    /// owner's ATA for the mint)
    #[must_use]
    pub const fn token_account(mut self, token_account: Pubkey) -> Self {
        self.token_account = Some(token_account);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the instruction sequence (optional approve, then create)
    pub fn build(self) -> Result<Vec<Instruction>> {
        let program_id = self.program_id.unwrap_or_else(program_id);
        let owner = required(self.owner, "owner")?;
        let token_mint = required(self.token_mint, "token_mint")?;
        let recipient = required(self.recipient, "recipient")?;
        let gateway_authority = required(self.gateway_authority, "gateway_authority")?;
        let policy_id = required(self.policy_id, "policy_id")?;
        let policy_type = required(self.policy_type, "policy_type")?;

        crate::validation::validate_policy_type(&policy_type)?;

        let (user_payment, _) = pda::user_payment_with_program_id(&owner, &token_mint, &program_id);
        let (gateway, _) = pda::gateway_with_program_id(&gateway_authority, &program_id);
        let (config, _) = pda::config_with_program_id(&program_id);
        let (payment_policy, _) =
            pda::payment_policy_with_program_id(&user_payment, policy_id, &program_id);
        let (delegate, _) = pda::payments_delegate_with_program_id(&program_id);

        let token_account = self.token_account.unwrap_or_else(|| {
            spl_associated_token_account::get_associated_token_address(&owner, &token_mint)
        });

        let mut instructions = Vec::new();

        if let Some(allowance) = self.allowance {
            let decimals = required(self.mint_decimals, "mint_decimals")?;
            let approve_ix = spl_token::instruction::approve_checked(
                &spl_token::id(),
                &token_account,
                &token_mint,
                &delegate,
                &owner,
                &[],
                allowance,
                decimals,
            )
            .map_err(|e| TributaryError::Generic(format!("Failed to build approve: {e}")))?;
            instructions.push(approve_ix);
        }

        let args = CreatePaymentPolicyArgs {
            policy_id,
            policy_type,
            memo: self.memo.unwrap_or([0u8; 64]),
        };

        let accounts = vec![
            AccountMeta::new(owner, true),                    // user (signer, payer)
            AccountMeta::new(user_payment, false),            // user_payment
            AccountMeta::new_readonly(recipient, false),      // recipient
            AccountMeta::new_readonly(token_mint, false),     // token_mint
            AccountMeta::new_readonly(gateway, false),        // gateway
            AccountMeta::new_readonly(config, false),         // config
            AccountMeta::new(payment_policy, false),          // payment_policy (PDA)
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        instructions.push(Instruction {
            program_id,
            accounts,
            data: serialize_args(discriminators::CREATE_PAYMENT_POLICY, &args)?,
        });

        Ok(instructions)
    }
}

#[derive(AnchorSerialize)]
struct ChangePolicyStatusArgs {
    policy_id: u32,
    new_status: PaymentStatus,
}

/// Builder for the `change_payment_policy_status` instruction
#[derive(Clone, Debug, Default)]
pub struct ChangePolicyStatusBuilder {
    owner: Option<Pubkey>,
    token_mint: Option<Pubkey>,
    policy_id: Option<u32>,
    new_status: Option<PaymentStatus>,
    program_id: Option<Pubkey>,
}

impl ChangePolicyStatusBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy owner (signer)
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the payment token mint
    #[must_use]
    pub const fn token_mint(mut self, token_mint: Pubkey) -> Self {
        self.token_mint = Some(token_mint);
        self
    }

    /// Set the policy id
    #[must_use]
    pub const fn policy_id(mut self, policy_id: u32) -> Self {
        self.policy_id = Some(policy_id);
        self
    }

    /// Set the requested status
    #[must_use]
    pub const fn new_status(mut self, new_status: PaymentStatus) -> Self {
        self.new_status = Some(new_status);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the instruction
    pub fn build(self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or_else(program_id);
        let owner = required(self.owner, "owner")?;
        let token_mint = required(self.token_mint, "token_mint")?;
        let policy_id = required(self.policy_id, "policy_id")?;
        let new_status = required(self.new_status, "new_status")?;

        let (user_payment, _) = pda::user_payment_with_program_id(&owner, &token_mint, &program_id);
        let (payment_policy, _) =
            pda::payment_policy_with_program_id(&user_payment, policy_id, &program_id);

        let args = ChangePolicyStatusArgs {
            policy_id,
            new_status,
        };

        let accounts = vec![
            AccountMeta::new(owner, true),                  // owner (signer)
            AccountMeta::new_readonly(user_payment, false), // user_payment
            AccountMeta::new_readonly(token_mint, false),   // token_mint
            AccountMeta::new(payment_policy, false),        // payment_policy
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: serialize_args(discriminators::CHANGE_PAYMENT_POLICY_STATUS, &args)?,
        })
    }
}

/// Builder for the `delete_payment_policy` instruction
#[derive(Clone, Debug, Default)]
pub struct DeletePolicyBuilder {
    owner: Option<Pubkey>,
    token_mint: Option<Pubkey>,
    policy_id: Option<u32>,
    program_id: Option<Pubkey>,
}

impl DeletePolicyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy owner (signer, receives the rent)
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the payment token mint
    #[must_use]
    pub const fn token_mint(mut self, token_mint: Pubkey) -> Self {
        self.token_mint = Some(token_mint);
        self
    }

    /// Set the policy id
    #[must_use]
    pub const fn policy_id(mut self, policy_id: u32) -> Self {
        self.policy_id = Some(policy_id);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the instruction
    pub fn build(self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or_else(program_id);
        let owner = required(self.owner, "owner")?;
        let token_mint = required(self.token_mint, "token_mint")?;
        let policy_id = required(self.policy_id, "policy_id")?;

        let (user_payment, _) = pda::user_payment_with_program_id(&owner, &token_mint, &program_id);
        let (payment_policy, _) =
            pda::payment_policy_with_program_id(&user_payment, policy_id, &program_id);

        let accounts = vec![
            AccountMeta::new(owner, true),                // owner (signer, rent dest)
            AccountMeta::new(user_payment, false),        // user_payment (count decrement)
            AccountMeta::new_readonly(token_mint, false), // token_mint
            AccountMeta::new(payment_policy, false),      // payment_policy (closed)
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: serialize_args(discriminators::DELETE_PAYMENT_POLICY, &policy_id)?,
        })
    }
}

/// Builder for the `execute_payment` instruction
///
/// The executor must be the gateway authority or the policy owner. The
/// three destination token accounts belong to the policy recipient, the
/// gateway fee recipient and the protocol fee recipient respectively;
/// use [`crate::ata`] helpers to resolve them.
#[derive(Clone, Debug, Default)]
pub struct ExecutePaymentBuilder {
    executor: Option<Pubkey>,
    owner: Option<Pubkey>,
    token_mint: Option<Pubkey>,
    gateway_authority: Option<Pubkey>,
    policy_id: Option<u32>,
    user_token_account: Option<Pubkey>,
    recipient_token_account: Option<Pubkey>,
    gateway_fee_account: Option<Pubkey>,
    protocol_fee_account: Option<Pubkey>,
    program_id: Option<Pubkey>,
}

impl ExecutePaymentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transaction caller (gateway authority or policy owner)
    #[must_use]
    pub const fn executor(mut self, executor: Pubkey) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Set the policy owner (for the user payment PDA)
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the payment token mint
    #[must_use]
    pub const fn token_mint(mut self, token_mint: Pubkey) -> Self {
        self.token_mint = Some(token_mint);
        self
    }

    /// Set the authority of the gateway the policy routes through
    #[must_use]
    pub const fn gateway_authority(mut self, authority: Pubkey) -> Self {
        self.gateway_authority = Some(authority);
        self
    }

    /// Set the policy id
    #[must_use]
    pub const fn policy_id(mut self, policy_id: u32) -> Self {
        self.policy_id = Some(policy_id);
        self
    }

    /// Override the source token account (defaults to the owner's ATA)
    #[must_use]
    pub const fn user_token_account(mut self, account: Pubkey) -> Self {
        self.user_token_account = Some(account);
        self
    }

    /// Set the recipient's token account
    #[must_use]
    pub const fn recipient_token_account(mut self, account: Pubkey) -> Self {
        self.recipient_token_account = Some(account);
        self
    }

    /// Set the gateway fee token account
    #[must_use]
    pub const fn gateway_fee_account(mut self, account: Pubkey) -> Self {
        self.gateway_fee_account = Some(account);
        self
    }

    /// Set the protocol fee token account
    #[must_use]
    pub const fn protocol_fee_account(mut self, account: Pubkey) -> Self {
        self.protocol_fee_account = Some(account);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the instruction
    pub fn build(self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or_else(program_id);
        let executor = required(self.executor, "executor")?;
        let owner = required(self.owner, "owner")?;
        let token_mint = required(self.token_mint, "token_mint")?;
        let gateway_authority = required(self.gateway_authority, "gateway_authority")?;
        let policy_id = required(self.policy_id, "policy_id")?;
        let recipient_token_account =
            required(self.recipient_token_account, "recipient_token_account")?;
        let gateway_fee_account = required(self.gateway_fee_account, "gateway_fee_account")?;
        let protocol_fee_account = required(self.protocol_fee_account, "protocol_fee_account")?;

        let (delegate, _) = pda::payments_delegate_with_program_id(&program_id);
        let (user_payment, _) = pda::user_payment_with_program_id(&owner, &token_mint, &program_id);
        let (payment_policy, _) =
            pda::payment_policy_with_program_id(&user_payment, policy_id, &program_id);
        let (gateway, _) = pda::gateway_with_program_id(&gateway_authority, &program_id);
        let (config, _) = pda::config_with_program_id(&program_id);

        let user_token_account = self.user_token_account.unwrap_or_else(|| {
            spl_associated_token_account::get_associated_token_address(&owner, &token_mint)
        });

        let accounts = vec![
            AccountMeta::new_readonly(executor, true),          // executor (signer)
            AccountMeta::new_readonly(delegate, false),         // payments_delegate
            AccountMeta::new(payment_policy, false),            // payment_policy
            AccountMeta::new(user_payment, false),              // user_payment
            AccountMeta::new(gateway, false),                   // gateway
            AccountMeta::new_readonly(config, false),           // config
            AccountMeta::new(user_token_account, false),        // user_token_account
            AccountMeta::new(recipient_token_account, false),   // recipient_token_account
            AccountMeta::new(gateway_fee_account, false),       // gateway_fee_account
            AccountMeta::new(protocol_fee_account, false),      // protocol_fee_account
            AccountMeta::new_readonly(spl_token::id(), false),  // token_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: discriminators::EXECUTE_PAYMENT.to_vec(),
        })
    }
}

/// Build the admin `update_config` instruction
pub fn update_config(admin: Pubkey, args: &UpdateConfigArgs) -> Result<Instruction> {
    crate::validation::validate_fee_bps(args.protocol_fee_bps)?;

    let program_id = program_id();
    let (config, _) = pda::config_with_program_id(&program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(config, false),
            AccountMeta::new_readonly(admin, true),
        ],
        data: serialize_args(discriminators::UPDATE_CONFIG, args)?,
    })
}

/// Build the admin `pause` instruction
#[must_use]
pub fn pause(admin: Pubkey) -> Instruction {
    toggle_pause(admin, discriminators::PAUSE)
}

/// Build the admin `unpause` instruction
#[must_use]
pub fn unpause(admin: Pubkey) -> Instruction {
    toggle_pause(admin, discriminators::UNPAUSE)
}

fn toggle_pause(admin: Pubkey, discriminator: [u8; 8]) -> Instruction {
    let program_id = program_id();
    let (config, _) = pda::config_with_program_id(&program_id);

    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(config, false),
            AccountMeta::new_readonly(admin, true),
        ],
        data: discriminator.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program_types::PaymentFrequency;

    fn sample_policy_type() -> PolicyType {
        PolicyType::subscription(5_000_000, PaymentFrequency::Weekly, true, Some(12), 0)
    }

    #[test]
    fn initialize_builder_layout() {
        let admin = Pubkey::new_unique();
        let ix = InitializeBuilder::new().admin(admin).build().unwrap();

        assert_eq!(ix.data, discriminators::INITIALIZE.to_vec());
        assert_eq!(ix.accounts.len(), 4);
        assert_eq!(ix.accounts[0].pubkey, admin);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[1].pubkey, pda::config().0);
        assert_eq!(ix.accounts[3].pubkey, system_program::ID);
    }

    #[test]
    fn create_user_payment_builder_layout() {
        let owner = Pubkey::new_unique();
        let token_account = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ix = CreateUserPaymentBuilder::new()
            .owner(owner)
            .token_account(token_account)
            .token_mint(mint)
            .build()
            .unwrap();

        assert_eq!(ix.data, discriminators::CREATE_USER_PAYMENT.to_vec());
        assert_eq!(ix.accounts[1].pubkey, pda::user_payment(&owner, &mint).0);
        assert!(ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[2].pubkey, token_account);
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let err = CreateUserPaymentBuilder::new()
            .owner(Pubkey::new_unique())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("token_account"));
    }

    #[test]
    fn create_gateway_args_encoding() {
        let admin = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let fee_recipient = Pubkey::new_unique();

        let ix = CreatePaymentGatewayBuilder::new()
            .admin(admin)
            .authority(authority)
            .fee_recipient(fee_recipient)
            .gateway_fee_bps(50)
            .name(crate::program_types::string_to_bytes("Acme"))
            .url(crate::program_types::string_to_bytes("https://acme.example"))
            .build()
            .unwrap();

        assert_eq!(ix.data[..8], discriminators::CREATE_PAYMENT_GATEWAY);
        // u16 LE fee follows the discriminator.
        assert_eq!(ix.data[8..10], [50, 0]);
        // 8 disc + 2 fee + 32 name + 64 url.
        assert_eq!(ix.data.len(), 106);
    }

    #[test]
    fn create_gateway_rejects_out_of_range_fee() {
        let err = CreatePaymentGatewayBuilder::new()
            .admin(Pubkey::new_unique())
            .authority(Pubkey::new_unique())
            .fee_recipient(Pubkey::new_unique())
            .gateway_fee_bps(10_001)
            .build()
            .unwrap_err();
        assert!(matches!(err, TributaryError::InvalidAmount));
    }

    #[test]
    fn create_policy_flow_without_allowance_is_single_instruction() {
        let instructions = CreatePaymentPolicyBuilder::new()
            .owner(Pubkey::new_unique())
            .token_mint(Pubkey::new_unique())
            .recipient(Pubkey::new_unique())
            .gateway_authority(Pubkey::new_unique())
            .policy_id(1)
            .policy_type(sample_policy_type())
            .build()
            .unwrap();

        assert_eq!(instructions.len(), 1);
        assert_eq!(
            instructions[0].data[..8],
            discriminators::CREATE_PAYMENT_POLICY
        );
        // policy_id follows as u32 LE.
        assert_eq!(instructions[0].data[8..12], [1, 0, 0, 0]);
        assert_eq!(instructions[0].accounts.len(), 8);
    }

    #[test]
    fn create_policy_flow_with_allowance_prepends_approve() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let instructions = CreatePaymentPolicyBuilder::new()
            .owner(owner)
            .token_mint(mint)
            .recipient(Pubkey::new_unique())
            .gateway_authority(Pubkey::new_unique())
            .policy_id(1)
            .policy_type(sample_policy_type())
            .allowance(15_000_000, 6)
            .build()
            .unwrap();

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].program_id, spl_token::id());
        assert_eq!(
            instructions[1].data[..8],
            discriminators::CREATE_PAYMENT_POLICY
        );
    }

    #[test]
    fn change_status_builder_layout() {
        let ix = ChangePolicyStatusBuilder::new()
            .owner(Pubkey::new_unique())
            .token_mint(Pubkey::new_unique())
            .policy_id(3)
            .new_status(PaymentStatus::Paused)
            .build()
            .unwrap();

        assert_eq!(ix.data[..8], discriminators::CHANGE_PAYMENT_POLICY_STATUS);
        assert_eq!(ix.data[8..12], [3, 0, 0, 0]);
        // Status tag: Paused = 1.
        assert_eq!(ix.data[12], 1);
        assert_eq!(ix.accounts.len(), 4);
    }

    #[test]
    fn delete_policy_builder_layout() {
        let ix = DeletePolicyBuilder::new()
            .owner(Pubkey::new_unique())
            .token_mint(Pubkey::new_unique())
            .policy_id(7)
            .build()
            .unwrap();

        assert_eq!(ix.data[..8], discriminators::DELETE_PAYMENT_POLICY);
        assert_eq!(ix.data[8..12], [7, 0, 0, 0]);
        assert!(ix.accounts[1].is_writable, "user_payment must be writable");
        assert!(ix.accounts[3].is_writable, "policy must be writable");
    }

    #[test]
    fn execute_payment_builder_layout() {
        let executor = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ix = ExecutePaymentBuilder::new()
            .executor(executor)
            .owner(owner)
            .token_mint(mint)
            .gateway_authority(Pubkey::new_unique())
            .policy_id(1)
            .recipient_token_account(Pubkey::new_unique())
            .gateway_fee_account(Pubkey::new_unique())
            .protocol_fee_account(Pubkey::new_unique())
            .build()
            .unwrap();

        assert_eq!(ix.data, discriminators::EXECUTE_PAYMENT.to_vec());
        assert_eq!(ix.accounts.len(), 11);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[1].pubkey, pda::payments_delegate().0);
        assert_eq!(ix.accounts[10].pubkey, spl_token::id());
        // Source defaults to the owner's ATA.
        assert_eq!(
            ix.accounts[6].pubkey,
            spl_associated_token_account::get_associated_token_address(&owner, &mint)
        );
    }

    #[test]
    fn admin_instructions_target_the_config_pda() {
        let admin = Pubkey::new_unique();
        let pause_ix = pause(admin);
        let unpause_ix = unpause(admin);

        assert_eq!(pause_ix.data, discriminators::PAUSE.to_vec());
        assert_eq!(unpause_ix.data, discriminators::UNPAUSE.to_vec());
        assert_eq!(pause_ix.accounts[0].pubkey, pda::config().0);
        assert!(pause_ix.accounts[1].is_signer);
    }
}
