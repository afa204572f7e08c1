//! Unit tests for error code semantics
//!
//! The first thirteen error codes (6000-6012) are part of the deployed
//! ABI: client SDKs map them to typed variants by number. These tests pin
//! the numbering so an accidental reorder of the enum shows up as a test
//! failure instead of as silently misclassified client errors.
//!
//! Note: these are unit tests over the error enum; full end-to-end
//! behavior runs under `anchor test`.

use anchor_lang::prelude::*;
use recurring_payments::errors::RecurringPaymentsError;

fn error_code(error: RecurringPaymentsError) -> u32 {
    let anchor_error: anchor_lang::error::Error = error.into();
    match anchor_error {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        anchor_lang::error::Error::ProgramError(_) => panic!("expected AnchorError"),
    }
}

#[test]
fn test_shipped_error_codes_are_stable() {
    assert_eq!(error_code(RecurringPaymentsError::ProgramPaused), 6000);
    assert_eq!(error_code(RecurringPaymentsError::InvalidAmount), 6001);
    assert_eq!(error_code(RecurringPaymentsError::InvalidFrequency), 6002);
    assert_eq!(error_code(RecurringPaymentsError::MaxPoliciesReached), 6003);
    assert_eq!(error_code(RecurringPaymentsError::Unauthorized), 6004);
    assert_eq!(
        error_code(RecurringPaymentsError::InvalidPolicyStatusTransition),
        6005
    );
    assert_eq!(error_code(RecurringPaymentsError::PolicyNotFound), 6006);
    assert_eq!(
        error_code(RecurringPaymentsError::InsufficientDelegatedAmount),
        6007
    );
    assert_eq!(error_code(RecurringPaymentsError::PaymentNotDue), 6008);
    assert_eq!(error_code(RecurringPaymentsError::InsufficientBalance), 6009);
    assert_eq!(error_code(RecurringPaymentsError::NoDelegateSet), 6010);
    assert_eq!(error_code(RecurringPaymentsError::PolicyPaused), 6011);
    assert_eq!(error_code(RecurringPaymentsError::InvalidInterval), 6012);
}

#[test]
fn test_appended_error_codes() {
    // Later additions only ever append; the shipped prefix above must
    // never shift.
    assert_eq!(error_code(RecurringPaymentsError::ArithmeticError), 6013);
    assert_eq!(error_code(RecurringPaymentsError::GatewayInactive), 6014);
    assert_eq!(error_code(RecurringPaymentsError::InvalidProgramData), 6015);
}

#[test]
fn test_error_messages_surface_the_condition() {
    let error: anchor_lang::error::Error = RecurringPaymentsError::PaymentNotDue.into();
    assert!(error.to_string().contains("not yet due"));

    let error: anchor_lang::error::Error = RecurringPaymentsError::NoDelegateSet.into();
    assert!(error.to_string().contains("delegate"));

    let error: anchor_lang::error::Error = RecurringPaymentsError::MaxPoliciesReached.into();
    assert!(error.to_string().contains("Maximum policies"));
}
