//! Unit tests for the policy lifecycle rules
//!
//! The on-chain state machine is deliberately small: `Active <-> Paused`
//! under owner control, deletion as the terminal transition, and an
//! automatic park into `Paused` when a policy's renewals are exhausted.
//! These tests validate the transition predicates and the exhaustion
//! rule applied by `execute_payment`.

use recurring_payments::state::{PaymentFrequency, PaymentStatus, PolicyType};

fn subscription(auto_renew: bool, max_renewals: Option<u32>) -> PolicyType {
    PolicyType::Subscription {
        amount: 5_000_000,
        auto_renew,
        max_renewals,
        payment_frequency: PaymentFrequency::Weekly,
        next_payment_due: 0,
        padding: [0u8; PolicyType::SUBSCRIPTION_PADDING],
    }
}

/// Mirror of the exhaustion rule in `execute_payment`: a one-shot policy
/// or one at its renewal cap parks in `Paused` after paying
fn exhausted_after(policy_type: &PolicyType, payment_count: u32) -> bool {
    !policy_type.auto_renew()
        || policy_type
            .max_renewals()
            .is_some_and(|max| payment_count >= max)
}

#[test]
fn test_only_cross_transitions_are_valid() {
    // The on-chain transition check rejects exactly the no-op requests.
    let valid = |from: PaymentStatus, to: PaymentStatus| from != to;

    assert!(valid(PaymentStatus::Active, PaymentStatus::Paused));
    assert!(valid(PaymentStatus::Paused, PaymentStatus::Active));
    assert!(!valid(PaymentStatus::Active, PaymentStatus::Active));
    assert!(!valid(PaymentStatus::Paused, PaymentStatus::Paused));
}

#[test]
fn test_one_shot_policy_pauses_after_first_payment() {
    let policy_type = subscription(false, None);
    assert!(exhausted_after(&policy_type, 1));
}

#[test]
fn test_unbounded_auto_renew_never_exhausts() {
    let policy_type = subscription(true, None);
    for count in [1u32, 10, 1_000, u32::MAX] {
        assert!(!exhausted_after(&policy_type, count));
    }
}

#[test]
fn test_renewal_cap_parks_policy_at_the_cap() {
    let policy_type = subscription(true, Some(12));
    assert!(!exhausted_after(&policy_type, 11));
    assert!(exhausted_after(&policy_type, 12));
    assert!(exhausted_after(&policy_type, 13));
}

#[test]
fn test_cap_of_one_behaves_like_one_shot() {
    let policy_type = subscription(true, Some(1));
    assert!(exhausted_after(&policy_type, 1));
}
