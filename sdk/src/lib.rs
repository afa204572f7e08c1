//! Tributary SDK - Rust SDK for the recurring payments protocol
//!
//! This crate provides a Rust SDK for interacting with the Tributary
//! recurring payments program on Solana. It includes utilities for:
//!
//! - Computing Program Derived Addresses (PDAs) and Associated Token
//!   Accounts (ATAs)
//! - Building payment transactions (approve→create policy, execute flows)
//! - Parsing `PaymentRecord` events from transaction logs
//! - Fetching and deserializing program accounts over RPC
//!
//! # Example Usage
//!
//! ```no_run
//! use tributary_sdk::{pda, ata};
//! use anchor_client::solana_sdk::pubkey::Pubkey;
//!
//! # fn main() -> tributary_sdk::Result<()> {
//! let owner = Pubkey::new_unique();
//! let mint = Pubkey::new_unique();
//!
//! // Compute PDAs
//! let (user_payment, _bump) = pda::user_payment(&owner, &mint);
//! let (policy, _bump) = pda::payment_policy(&user_payment, 1);
//! let (delegate, _bump) = pda::payments_delegate();
//!
//! // Compute the owner's token ATA
//! let user_ata = ata::get_associated_token_address_for_mint(&owner, &mint)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod ata;
pub mod client;
pub mod error;
pub mod events;
pub mod pda;
pub mod program_types;
pub mod transaction_builder;
pub mod utils;
pub mod validation;

// Re-export commonly used items
pub use client::TributaryClient;
pub use error::{Result, TributaryError};
pub use events::{parse_payment_records, PaymentRecord};
pub use program_types::*;
pub use transaction_builder::{
    pause, unpause, update_config, ChangePolicyStatusBuilder, CreatePaymentGatewayBuilder,
    CreatePaymentPolicyBuilder, CreateUserPaymentBuilder, DeletePolicyBuilder,
    ExecutePaymentBuilder, InitializeBuilder, SetGatewayStatusBuilder,
};
pub use validation::*;

// Re-export general utilities
pub use utils::{
    amount_to_ui, create_memo_instruction, format_timestamp, frequency_interval_seconds,
    is_payment_due, next_due_after, ui_to_amount,
};

// Re-export commonly used external types
pub use anchor_client::solana_client;
pub use anchor_client::solana_sdk;
pub use anchor_client::ClientError;
pub use anchor_lang::{AnchorDeserialize, AnchorSerialize};
pub use spl_associated_token_account;
pub use spl_token;

use anchor_client::solana_sdk::pubkey::Pubkey;
use once_cell::sync::Lazy;
use std::str::FromStr;

/// Program id the deployed protocol runs under
pub const DEFAULT_PROGRAM_ID: &str = "TRibg8W8zmPHQqWtyAD1rEBRXEdyU13Mu6qX1Sg42tJ";

/// Program ID, overridable via the `TRIBUTARY_PROGRAM_ID` environment
/// variable for localnet and devnet deployments.
///
/// # Panics
/// Panics if the override is set but is not a valid base58 pubkey. This
/// is intentional: silently falling back would target the wrong program.
pub static PROGRAM_ID: Lazy<Pubkey> = Lazy::new(|| {
    let id = std::env::var("TRIBUTARY_PROGRAM_ID")
        .unwrap_or_else(|_| DEFAULT_PROGRAM_ID.to_string());
    Pubkey::from_str(&id).expect(
        "TRIBUTARY_PROGRAM_ID must be a valid base58-encoded program id.\n\
         Example: export TRIBUTARY_PROGRAM_ID=YourProgramIdHere111111111111111111111111111",
    )
});

/// Get the program ID as a `Pubkey`
#[must_use]
pub fn program_id() -> Pubkey {
    *PROGRAM_ID
}
