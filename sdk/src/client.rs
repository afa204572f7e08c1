//! RPC client for fetching and querying program accounts
//!
//! A thin wrapper over [`RpcClient`] that fetches protocol accounts,
//! verifies their discriminators, and deserializes them into the mirror
//! types from [`crate::program_types`].

use anchor_client::solana_client::rpc_client::RpcClient;
use anchor_client::solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use anchor_client::solana_client::rpc_filter::{Memcmp, RpcFilterType};
use anchor_client::solana_sdk::commitment_config::CommitmentConfig;
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_lang::AnchorDeserialize;
use tracing::debug;

use crate::error::{Result, TributaryError};
use crate::program_types::{PaymentGateway, PaymentPolicy, ProgramConfig, UserPayment};
use crate::{pda, utils};

/// Account discriminators from the deployed IDL
/// (sha256("account:<Name>")[..8])
pub mod account_discriminators {
    pub const PROGRAM_CONFIG: [u8; 8] = [196, 210, 90, 231, 144, 149, 140, 63];
    pub const PAYMENT_GATEWAY: [u8; 8] = [200, 101, 8, 23, 141, 157, 106, 112];
    pub const USER_PAYMENT: [u8; 8] = [115, 161, 14, 69, 223, 123, 210, 9];
    pub const PAYMENT_POLICY: [u8; 8] = [48, 74, 183, 94, 41, 92, 52, 44];
}

/// Offset of the `user_payment` field inside a `PaymentPolicy` account
/// (right after the 8-byte discriminator)
const POLICY_PARENT_OFFSET: usize = 8;

/// Client for reading protocol state over RPC
pub struct TributaryClient {
    rpc: RpcClient,
    program_id: Pubkey,
}

impl TributaryClient {
    /// Create a client for the given RPC endpoint using the crate-level
    /// program id
    pub fn new(rpc_url: &str) -> Result<Self> {
        Ok(Self {
            rpc: RpcClient::new_with_commitment(
                rpc_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
            program_id: crate::program_id(),
        })
    }

    /// Create a client targeting a custom program id
    pub fn new_with_program_id(rpc_url: &str, program_id: Pubkey) -> Result<Self> {
        Ok(Self {
            rpc: RpcClient::new_with_commitment(
                rpc_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
            program_id,
        })
    }

    /// The program id this client queries
    #[must_use]
    pub const fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Borrow the underlying RPC client
    #[must_use]
    pub const fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Fetch the singleton program config
    pub fn get_program_config(&self) -> Result<ProgramConfig> {
        let (address, _) = pda::config_with_program_id(&self.program_id);
        self.fetch_account(
            &address,
            &account_discriminators::PROGRAM_CONFIG,
            "ProgramConfig",
        )
    }

    /// Fetch a gateway by its authority
    pub fn get_gateway(&self, authority: &Pubkey) -> Result<PaymentGateway> {
        let (address, _) = pda::gateway_with_program_id(authority, &self.program_id);
        self.fetch_account(
            &address,
            &account_discriminators::PAYMENT_GATEWAY,
            "PaymentGateway",
        )
    }

    /// Fetch the user payment account for an (owner, mint) pair
    pub fn get_user_payment(&self, owner: &Pubkey, token_mint: &Pubkey) -> Result<UserPayment> {
        let (address, _) = pda::user_payment_with_program_id(owner, token_mint, &self.program_id);
        self.fetch_account(&address, &account_discriminators::USER_PAYMENT, "UserPayment")
    }

    /// Fetch one policy under a user payment account
    pub fn get_payment_policy(
        &self,
        user_payment: &Pubkey,
        policy_id: u32,
    ) -> Result<PaymentPolicy> {
        let (address, _) =
            pda::payment_policy_with_program_id(user_payment, policy_id, &self.program_id);
        self.fetch_account(
            &address,
            &account_discriminators::PAYMENT_POLICY,
            "PaymentPolicy",
        )
    }

    /// List every policy under a user payment account
    ///
    /// Server-side filtered by account discriminator and the parent
    /// `user_payment` pubkey at its fixed offset.
    pub fn list_user_policies(&self, user_payment: &Pubkey) -> Result<Vec<(Pubkey, PaymentPolicy)>> {
        let filters = vec![
            RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
                0,
                account_discriminators::PAYMENT_POLICY.to_vec(),
            )),
            RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
                POLICY_PARENT_OFFSET,
                user_payment.to_bytes().to_vec(),
            )),
        ];

        let config = RpcProgramAccountsConfig {
            filters: Some(filters),
            account_config: RpcAccountInfoConfig {
                encoding: Some(anchor_client::solana_account_decoder::UiAccountEncoding::Base64),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.program_id, config)
            .map_err(|e| TributaryError::RpcError(e.to_string()))?;

        debug!(
            user_payment = %user_payment,
            count = accounts.len(),
            "fetched policies"
        );

        accounts
            .into_iter()
            .map(|(address, account)| {
                deserialize_account::<PaymentPolicy>(
                    &account.data,
                    &account_discriminators::PAYMENT_POLICY,
                    "PaymentPolicy",
                )
                .map(|policy| (address, policy))
            })
            .collect()
    }

    /// List the policies under a user payment account that are due at
    /// `now` (Active and past their due date)
    pub fn list_due_policies(
        &self,
        user_payment: &Pubkey,
        now: i64,
    ) -> Result<Vec<(Pubkey, PaymentPolicy)>> {
        let policies = self.list_user_policies(user_payment)?;
        Ok(policies
            .into_iter()
            .filter(|(_, policy)| utils::is_payment_due(policy, now))
            .collect())
    }

    fn fetch_account<T: AnchorDeserialize>(
        &self,
        address: &Pubkey,
        discriminator: &[u8; 8],
        name: &str,
    ) -> Result<T> {
        debug!(address = %address, account = name, "fetching account");

        let account = self
            .rpc
            .get_account(address)
            .map_err(|_| TributaryError::AccountNotFound(format!("{name} at {address}")))?;

        deserialize_account(&account.data, discriminator, name)
    }
}

/// Deserialize raw account data, verifying the 8-byte discriminator
pub fn deserialize_account<T: AnchorDeserialize>(
    data: &[u8],
    discriminator: &[u8; 8],
    name: &str,
) -> Result<T> {
    if data.len() < 8 || &data[..8] != discriminator {
        return Err(TributaryError::DiscriminatorMismatch(name.to_string()));
    }

    T::try_from_slice(&data[8..])
        .map_err(|e| TributaryError::ParseError(format!("malformed {name}: {e}")))
}
