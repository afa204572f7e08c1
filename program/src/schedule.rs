//! Payment schedule arithmetic
//!
//! Advances a policy's `next_payment_due` after a successful execution.
//! Fixed-length frequencies add whole seconds; month-based frequencies add
//! civil-calendar months, keeping the day-of-month where possible and
//! clamping to the end of shorter months (Jan 31 + 1 month = Feb 28/29).
//!
//! The next due date is always derived from the PREVIOUS due date, not
//! from the execution time, so the cadence stays anchored to the schedule
//! start: N on-time daily executions from `t0` land exactly on
//! `t0 + N * 86_400`. A late execution catches up past any missed
//! periods without charging for them.

use anchor_lang::prelude::*;

use crate::errors::RecurringPaymentsError;
use crate::state::PaymentFrequency;

/// Compute the due date following `current_due`, strictly after `now`
///
/// Called only after a successful execution, which requires
/// `now >= current_due`, so at least one interval is always added.
///
/// # Errors
/// Returns `InvalidInterval` for a non-positive custom interval and
/// `ArithmeticError` if the date arithmetic overflows.
pub fn advance(current_due: i64, frequency: PaymentFrequency, now: i64) -> Result<i64> {
    let mut next_due = current_due;

    if let Some(seconds) = frequency.fixed_seconds() {
        require!(seconds > 0, RecurringPaymentsError::InvalidInterval);
        while next_due <= now {
            next_due = next_due
                .checked_add(seconds)
                .ok_or(RecurringPaymentsError::ArithmeticError)?;
        }
        return Ok(next_due);
    }

    // Month-based frequency: fixed_seconds() and months() partition the
    // enum, so months() is Some here.
    let months = frequency
        .months()
        .ok_or(RecurringPaymentsError::InvalidFrequency)?;
    while next_due <= now {
        next_due = add_months(next_due, months)?;
    }
    Ok(next_due)
}

/// Add calendar months to a Unix timestamp, preserving time-of-day and
/// clamping the day-of-month to the target month's length
fn add_months(timestamp: i64, months: u32) -> Result<i64> {
    let days_since_epoch = timestamp.div_euclid(86_400);
    let seconds_in_day = timestamp.rem_euclid(86_400);

    let (year, month, day) = civil_from_days(days_since_epoch)?;

    let zero_based = month
        .checked_sub(1)
        .and_then(|m| m.checked_add(i64::from(months)))
        .ok_or(RecurringPaymentsError::ArithmeticError)?;
    let new_year = year
        .checked_add(zero_based.div_euclid(12))
        .ok_or(RecurringPaymentsError::ArithmeticError)?;
    let new_month = zero_based
        .rem_euclid(12)
        .checked_add(1)
        .ok_or(RecurringPaymentsError::ArithmeticError)?;

    // Day overflow clamps: Jan 31 + 1 month = Feb 28 (29 in leap years)
    let new_day = day.min(days_in_month(new_year, new_month));

    let new_days = days_from_civil(new_year, new_month, new_day)?;
    new_days
        .checked_mul(86_400)
        .and_then(|secs| secs.checked_add(seconds_in_day))
        .ok_or_else(|| RecurringPaymentsError::ArithmeticError.into())
}

/// Convert days since 1970-01-01 into (year, month, day), month and day
/// 1-indexed
fn civil_from_days(days_since_epoch: i64) -> Result<(i64, i64, i64)> {
    let mut year = 1970i64;
    let mut remaining = days_since_epoch;

    if remaining >= 0 {
        loop {
            let days_in_year = if is_leap_year(year) { 366 } else { 365 };
            if remaining < days_in_year {
                break;
            }
            remaining = remaining
                .checked_sub(days_in_year)
                .ok_or(RecurringPaymentsError::ArithmeticError)?;
            year = year
                .checked_add(1)
                .ok_or(RecurringPaymentsError::ArithmeticError)?;
        }
    } else {
        while remaining < 0 {
            year = year
                .checked_sub(1)
                .ok_or(RecurringPaymentsError::ArithmeticError)?;
            let days_in_year = if is_leap_year(year) { 366 } else { 365 };
            remaining = remaining
                .checked_add(days_in_year)
                .ok_or(RecurringPaymentsError::ArithmeticError)?;
        }
    }

    let mut month = 1i64;
    loop {
        let len = days_in_month(year, month);
        if remaining < len {
            break;
        }
        remaining = remaining
            .checked_sub(len)
            .ok_or(RecurringPaymentsError::ArithmeticError)?;
        month = month
            .checked_add(1)
            .ok_or(RecurringPaymentsError::ArithmeticError)?;
    }

    let day = remaining
        .checked_add(1)
        .ok_or(RecurringPaymentsError::ArithmeticError)?;
    Ok((year, month, day))
}

/// Convert a (year, month, day) civil date back to days since 1970-01-01
fn days_from_civil(year: i64, month: i64, day: i64) -> Result<i64> {
    let mut days = 0i64;

    if year >= 1970 {
        let mut y = 1970i64;
        while y < year {
            let len = if is_leap_year(y) { 366 } else { 365 };
            days = days
                .checked_add(len)
                .ok_or(RecurringPaymentsError::ArithmeticError)?;
            y = y
                .checked_add(1)
                .ok_or(RecurringPaymentsError::ArithmeticError)?;
        }
    } else {
        let mut y = year;
        while y < 1970 {
            let len = if is_leap_year(y) { 366 } else { 365 };
            days = days
                .checked_sub(len)
                .ok_or(RecurringPaymentsError::ArithmeticError)?;
            y = y
                .checked_add(1)
                .ok_or(RecurringPaymentsError::ArithmeticError)?;
        }
    }

    let mut m = 1i64;
    while m < month {
        days = days
            .checked_add(days_in_month(year, m))
            .ok_or(RecurringPaymentsError::ArithmeticError)?;
        m = m
            .checked_add(1)
            .ok_or(RecurringPaymentsError::ArithmeticError)?;
    }

    day.checked_sub(1)
        .and_then(|d| days.checked_add(d))
        .ok_or_else(|| RecurringPaymentsError::ArithmeticError.into())
}

const fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    #[test]
    fn daily_advance_stays_anchored() {
        // N on-time executions from t0 must land on t0 + N * 86_400.
        let t0 = 1_700_000_000;
        let mut due = t0;
        for n in 1..=30i64 {
            due = advance(due, PaymentFrequency::Daily, due).unwrap();
            assert_eq!(due, t0 + n * DAY);
        }
    }

    #[test]
    fn weekly_advance() {
        let due = advance(0, PaymentFrequency::Weekly, 0).unwrap();
        assert_eq!(due, 604_800);
    }

    #[test]
    fn custom_advance() {
        let due = advance(100, PaymentFrequency::Custom(3_600), 100).unwrap();
        assert_eq!(due, 3_700);
    }

    #[test]
    fn custom_zero_interval_rejected() {
        // Creation validates the floor, but advance must still refuse to
        // spin on a zero interval.
        assert!(advance(0, PaymentFrequency::Custom(0), 0).is_err());
    }

    #[test]
    fn late_execution_catches_up_without_double_charging() {
        // Due at 0, executed 5 days late: next due skips the missed
        // periods and lands strictly after now.
        let due = advance(0, PaymentFrequency::Daily, 5 * DAY).unwrap();
        assert_eq!(due, 6 * DAY);
    }

    #[test]
    fn monthly_clamps_jan_31_to_feb_28() {
        // 1970-01-31 is day 30 since epoch; 1970 is not a leap year.
        let jan_31 = 30 * DAY;
        let due = advance(jan_31, PaymentFrequency::Monthly, jan_31).unwrap();
        // 1970-02-28 is day 58 since epoch.
        assert_eq!(due, 58 * DAY);
    }

    #[test]
    fn monthly_clamps_to_feb_29_in_leap_years() {
        // 1972-01-31: 730 days for 1970-1971, plus 30.
        let jan_31_1972 = 760 * DAY;
        let due = advance(jan_31_1972, PaymentFrequency::Monthly, jan_31_1972).unwrap();
        // 1972-02-29 is day 789 since epoch.
        assert_eq!(due, 789 * DAY);
    }

    #[test]
    fn monthly_preserves_mid_month_day_and_time_of_day() {
        // 1970-01-15T12:00:00 -> 1970-02-15T12:00:00
        let jan_15_noon = 14 * DAY + 43_200;
        let due = advance(jan_15_noon, PaymentFrequency::Monthly, jan_15_noon).unwrap();
        assert_eq!(due, 45 * DAY + 43_200);
    }

    #[test]
    fn quarterly_clamps_jan_31_to_apr_30() {
        let jan_31 = 30 * DAY;
        let due = advance(jan_31, PaymentFrequency::Quarterly, jan_31).unwrap();
        // 1970-04-30 is day 119 since epoch.
        assert_eq!(due, 119 * DAY);
    }

    #[test]
    fn annually_crosses_year_boundary() {
        // 1970-03-01 (day 59) -> 1971-03-01 (day 424).
        let mar_1 = 59 * DAY;
        let due = advance(mar_1, PaymentFrequency::Annually, mar_1).unwrap();
        assert_eq!(due, 424 * DAY);
    }

    #[test]
    fn semi_annual_advance() {
        // 1970-01-01 -> 1970-07-01 (day 181).
        let due = advance(0, PaymentFrequency::SemiAnnually, 0).unwrap();
        assert_eq!(due, 181 * DAY);
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let due = i64::MAX - 10;
        assert!(advance(due, PaymentFrequency::Custom(3_600), due).is_err());
    }

    #[test]
    fn civil_round_trip() {
        for days in [0i64, 30, 58, 365, 760, 789, 10_957, 20_000] {
            let (y, m, d) = civil_from_days(days).unwrap();
            assert_eq!(days_from_civil(y, m, d).unwrap(), days);
        }
    }
}
