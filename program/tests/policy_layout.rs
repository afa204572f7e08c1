//! Unit tests for account layout and ABI stability
//!
//! The deployed accounts carry explicit padding so future fields (and
//! future `PolicyType` variants) slot in without resizing. These tests
//! pin the byte-level contract: payload footprints, account space
//! constants and the Anchor discriminators clients hard-code.

use anchor_lang::Discriminator;
use recurring_payments::events::PaymentRecord;
use recurring_payments::state::{
    PaymentFrequency, PaymentGateway, PaymentPolicy, PaymentStatus, PolicyType, ProgramConfig,
    UserPayment,
};

use anchor_lang::AnchorSerialize;

/// Every `PolicyType` variant occupies a fixed 128-byte payload at its
/// maximum borsh footprint
#[test]
fn test_policy_type_fixed_footprint() {
    assert_eq!(PolicyType::PAYLOAD_SIZE, 128);

    // Widest encoding: Custom frequency plus Some(renewal cap).
    let widest = PolicyType::Subscription {
        amount: u64::MAX,
        auto_renew: true,
        max_renewals: Some(u32::MAX),
        payment_frequency: PaymentFrequency::Custom(u64::MAX),
        next_payment_due: i64::MAX,
        padding: [0u8; PolicyType::SUBSCRIPTION_PADDING],
    };
    let bytes = widest.try_to_vec().unwrap();
    assert_eq!(bytes.len(), 1 + PolicyType::PAYLOAD_SIZE);
}

/// Account space constants match the field-by-field sums
#[test]
fn test_account_space_constants() {
    assert_eq!(ProgramConfig::SIZE, 336);
    assert_eq!(PaymentGateway::SIZE, 348);
    assert_eq!(UserPayment::SIZE, 382);
    assert_eq!(PaymentPolicy::SIZE, 587);
}

/// Account discriminators are the sha256 prefixes clients and indexers
/// have already shipped against
#[test]
fn test_account_discriminators() {
    assert_eq!(
        ProgramConfig::DISCRIMINATOR,
        &[196, 210, 90, 231, 144, 149, 140, 63]
    );
    assert_eq!(
        PaymentGateway::DISCRIMINATOR,
        &[200, 101, 8, 23, 141, 157, 106, 112]
    );
    assert_eq!(
        UserPayment::DISCRIMINATOR,
        &[115, 161, 14, 69, 223, 123, 210, 9]
    );
    assert_eq!(
        PaymentPolicy::DISCRIMINATOR,
        &[48, 74, 183, 94, 41, 92, 52, 44]
    );
}

/// Event discriminator for the payment audit record
#[test]
fn test_event_discriminator() {
    assert_eq!(
        PaymentRecord::DISCRIMINATOR,
        &[42, 100, 253, 124, 170, 186, 231, 186]
    );
}

/// Instruction discriminators for the client-facing surface
#[test]
fn test_instruction_discriminators() {
    use recurring_payments::instruction;

    assert_eq!(
        instruction::Initialize::DISCRIMINATOR,
        &[175, 175, 109, 31, 13, 152, 155, 237]
    );
    assert_eq!(
        instruction::CreateUserPayment::DISCRIMINATOR,
        &[115, 54, 209, 72, 127, 194, 206, 49]
    );
    assert_eq!(
        instruction::CreatePaymentGateway::DISCRIMINATOR,
        &[186, 227, 210, 95, 154, 36, 146, 9]
    );
    assert_eq!(
        instruction::CreatePaymentPolicy::DISCRIMINATOR,
        &[32, 50, 29, 251, 174, 23, 112, 121]
    );
    assert_eq!(
        instruction::ChangePaymentPolicyStatus::DISCRIMINATOR,
        &[250, 83, 53, 119, 200, 114, 9, 132]
    );
    assert_eq!(
        instruction::DeletePaymentPolicy::DISCRIMINATOR,
        &[146, 180, 143, 169, 50, 40, 146, 86]
    );
    assert_eq!(
        instruction::ExecutePayment::DISCRIMINATOR,
        &[86, 4, 7, 7, 120, 139, 232, 139]
    );
}

/// Status serializes to a single stable byte per variant
#[test]
fn test_status_encoding() {
    assert_eq!(PaymentStatus::Active.try_to_vec().unwrap(), vec![0]);
    assert_eq!(PaymentStatus::Paused.try_to_vec().unwrap(), vec![1]);
}

/// Frequency tags are stable; `Custom` appends its interval
#[test]
fn test_frequency_encoding() {
    assert_eq!(PaymentFrequency::Daily.try_to_vec().unwrap(), vec![0]);
    assert_eq!(PaymentFrequency::Annually.try_to_vec().unwrap(), vec![5]);

    let custom = PaymentFrequency::Custom(3_600).try_to_vec().unwrap();
    assert_eq!(custom[0], 6);
    assert_eq!(custom.len(), 9);
    assert_eq!(u64::from_le_bytes(custom[1..9].try_into().unwrap()), 3_600);
}
