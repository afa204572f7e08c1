//! Associated Token Account (ATA) computation and token program
//! detection utilities

use anchor_client::solana_client::rpc_client::RpcClient;
use anchor_client::solana_sdk::commitment_config::CommitmentConfig;
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::{account::Account, program_pack::Pack};
use spl_associated_token_account::get_associated_token_address;
use spl_token::state::{Account as TokenAccount, Mint};

use crate::error::{Result, TributaryError};

/// Token program variants supported by the SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenProgram {
    /// Classic SPL Token program
    Token,
    /// Token Extensions (Token-2022) program
    Token2022,
}

impl TokenProgram {
    /// Get the program ID for this token program variant
    #[must_use]
    pub const fn program_id(&self) -> Pubkey {
        match self {
            Self::Token => spl_token::id(),
            Self::Token2022 => spl_token_2022::id(),
        }
    }
}

/// Get the associated token address for a wallet and mint
pub fn get_associated_token_address_for_mint(wallet: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    Ok(get_associated_token_address(wallet, mint))
}

/// Get the associated token address with an explicit token program
pub fn get_associated_token_address_with_program(
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program: TokenProgram,
) -> Result<Pubkey> {
    Ok(
        spl_associated_token_account::get_associated_token_address_with_program_id(
            wallet,
            mint,
            &token_program.program_id(),
        ),
    )
}

/// Detect the token program that owns a mint
pub fn detect_token_program(rpc_client: &RpcClient, mint: &Pubkey) -> Result<TokenProgram> {
    let account = rpc_client
        .get_account_with_commitment(mint, CommitmentConfig::confirmed())
        .map_err(|e| TributaryError::Generic(format!("Failed to fetch mint account: {e}")))?
        .value
        .ok_or_else(|| TributaryError::AccountNotFound(mint.to_string()))?;

    if account.owner == spl_token::id() {
        Ok(TokenProgram::Token)
    } else if account.owner == spl_token_2022::id() {
        Ok(TokenProgram::Token2022)
    } else {
        Err(TributaryError::TokenProgramDetectionFailed {
            mint: mint.to_string(),
        })
    }
}

/// Parse a mint account fetched over RPC
pub fn parse_mint_account(account: &Account) -> Result<Mint> {
    Mint::unpack(&account.data)
        .map_err(|e| TributaryError::Generic(format!("Failed to parse SPL Token mint: {e}")))
}

/// Parse a token account fetched over RPC
pub fn parse_token_account(account: &Account) -> Result<TokenAccount> {
    TokenAccount::unpack(&account.data)
        .map_err(|e| TributaryError::Generic(format!("Failed to parse SPL Token account: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ata_derivation_is_deterministic() {
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ata1 = get_associated_token_address_for_mint(&wallet, &mint).unwrap();
        let ata2 = get_associated_token_address_for_mint(&wallet, &mint).unwrap();
        assert_eq!(ata1, ata2);
    }

    #[test]
    fn ata_varies_by_wallet_and_mint() {
        let wallet = Pubkey::new_unique();
        let other_wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ata1 = get_associated_token_address_for_mint(&wallet, &mint).unwrap();
        let ata2 = get_associated_token_address_for_mint(&other_wallet, &mint).unwrap();
        assert_ne!(ata1, ata2);
    }

    #[test]
    fn token_program_ids() {
        assert_eq!(TokenProgram::Token.program_id(), spl_token::id());
        assert_eq!(TokenProgram::Token2022.program_id(), spl_token_2022::id());
    }

    #[test]
    fn token_2022_atas_differ_from_classic() {
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let classic =
            get_associated_token_address_with_program(&wallet, &mint, TokenProgram::Token).unwrap();
        let token_2022 =
            get_associated_token_address_with_program(&wallet, &mint, TokenProgram::Token2022)
                .unwrap();
        assert_ne!(classic, token_2022);
    }
}
