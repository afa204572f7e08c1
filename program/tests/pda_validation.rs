//! Unit tests for PDA derivation
//!
//! Every account in the protocol is deterministically addressed from
//! seeds plus the program id — there is no off-chain registry to keep in
//! sync. These tests validate determinism, uniqueness across seed
//! inputs, and the little-endian policy-id encoding the policy seeds
//! depend on.

use anchor_lang::prelude::Pubkey;
use recurring_payments::constants::{
    CONFIG_SEED, GATEWAY_SEED, PAYMENTS_SEED, PAYMENT_POLICY_SEED, USER_PAYMENT_SEED,
};

/// Deriving the same PDA twice yields the same address and bump
#[test]
fn test_derivation_is_deterministic() {
    let owner = Pubkey::new_unique();
    let mint = Pubkey::new_unique();

    let first = Pubkey::find_program_address(
        &[USER_PAYMENT_SEED, owner.as_ref(), mint.as_ref()],
        &recurring_payments::ID,
    );
    let second = Pubkey::find_program_address(
        &[USER_PAYMENT_SEED, owner.as_ref(), mint.as_ref()],
        &recurring_payments::ID,
    );

    assert_eq!(first, second);
}

/// The config and delegate PDAs are singletons under the program id
#[test]
fn test_singleton_pdas() {
    let (config, _) = Pubkey::find_program_address(&[CONFIG_SEED], &recurring_payments::ID);
    let (delegate, _) = Pubkey::find_program_address(&[PAYMENTS_SEED], &recurring_payments::ID);

    assert_ne!(config, delegate);

    // A different program id moves both addresses.
    let other_program = Pubkey::new_unique();
    let (foreign_config, _) = Pubkey::find_program_address(&[CONFIG_SEED], &other_program);
    assert_ne!(config, foreign_config);
}

/// One user payment account per (owner, mint) pair
#[test]
fn test_user_payment_uniqueness() {
    let owner = Pubkey::new_unique();
    let mint_a = Pubkey::new_unique();
    let mint_b = Pubkey::new_unique();

    let (for_mint_a, _) = Pubkey::find_program_address(
        &[USER_PAYMENT_SEED, owner.as_ref(), mint_a.as_ref()],
        &recurring_payments::ID,
    );
    let (for_mint_b, _) = Pubkey::find_program_address(
        &[USER_PAYMENT_SEED, owner.as_ref(), mint_b.as_ref()],
        &recurring_payments::ID,
    );
    assert_ne!(for_mint_a, for_mint_b);

    let other_owner = Pubkey::new_unique();
    let (for_other_owner, _) = Pubkey::find_program_address(
        &[USER_PAYMENT_SEED, other_owner.as_ref(), mint_a.as_ref()],
        &recurring_payments::ID,
    );
    assert_ne!(for_mint_a, for_other_owner);
}

/// Gateway PDAs are unique per authority
#[test]
fn test_gateway_uniqueness() {
    let authority_a = Pubkey::new_unique();
    let authority_b = Pubkey::new_unique();

    let (gateway_a, _) = Pubkey::find_program_address(
        &[GATEWAY_SEED, authority_a.as_ref()],
        &recurring_payments::ID,
    );
    let (gateway_b, _) = Pubkey::find_program_address(
        &[GATEWAY_SEED, authority_b.as_ref()],
        &recurring_payments::ID,
    );

    assert_ne!(gateway_a, gateway_b);
}

/// Policy seeds encode the id as 4 little-endian bytes; distinct ids
/// yield distinct addresses, and a colliding id simply re-derives the
/// same address (which makes a duplicate `init` fail)
#[test]
fn test_policy_id_little_endian_seeds() {
    let user_payment = Pubkey::new_unique();

    let policy_pda = |id: u32| {
        Pubkey::find_program_address(
            &[
                PAYMENT_POLICY_SEED,
                user_payment.as_ref(),
                id.to_le_bytes().as_ref(),
            ],
            &recurring_payments::ID,
        )
        .0
    };

    assert_eq!(1u32.to_le_bytes(), [1, 0, 0, 0]);
    assert_eq!(256u32.to_le_bytes(), [0, 1, 0, 0]);

    let first = policy_pda(1);
    assert_ne!(first, policy_pda(2));
    assert_ne!(first, policy_pda(256));
    assert_eq!(first, policy_pda(1));
}

/// The same policy id under different parents addresses different
/// accounts
#[test]
fn test_policy_scoped_to_parent() {
    let parent_a = Pubkey::new_unique();
    let parent_b = Pubkey::new_unique();
    let id = 7u32.to_le_bytes();

    let (policy_a, _) = Pubkey::find_program_address(
        &[PAYMENT_POLICY_SEED, parent_a.as_ref(), id.as_ref()],
        &recurring_payments::ID,
    );
    let (policy_b, _) = Pubkey::find_program_address(
        &[PAYMENT_POLICY_SEED, parent_b.as_ref(), id.as_ref()],
        &recurring_payments::ID,
    );

    assert_ne!(policy_a, policy_b);
}
