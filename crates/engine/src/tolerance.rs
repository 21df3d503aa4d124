use bankmatch_core::datetime::days_between;
use bankmatch_core::Money;
use chrono::NaiveDateTime;

use crate::config::MatchingConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountMatch {
    pub exact: bool,
    /// Within either the fixed or the percentage tolerance. Implied by `exact`.
    pub close: bool,
    pub variance: Money,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateMatch {
    /// Less than one day apart.
    pub exact: bool,
    pub close: bool,
    pub variance_days: f64,
}

pub fn amount_match(x: Money, y: Money, config: &MatchingConfig) -> AmountMatch {
    let variance = (x - y).abs();
    let within_fixed = variance < config.amount_tolerance_fixed;

    let denominator = x.abs().max(y.abs());
    let within_percent = if denominator.is_zero() {
        // Both sides zero.
        true
    } else {
        variance.to_f64() / denominator.to_f64() < config.amount_tolerance_percent
    };

    let exact = within_fixed || (denominator.is_zero() && variance.is_zero());
    AmountMatch {
        exact,
        close: exact || within_percent,
        variance,
    }
}

pub fn date_match(d1: NaiveDateTime, d2: NaiveDateTime, config: &MatchingConfig) -> DateMatch {
    let variance_days = days_between(d1, d2);
    DateMatch {
        exact: variance_days < 1.0,
        close: variance_days <= f64::from(config.date_tolerance_days),
        variance_days,
    }
}

pub fn within_date_tolerance(d1: NaiveDateTime, d2: NaiveDateTime, config: &MatchingConfig) -> bool {
    date_match(d1, d2, config).close
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn identical_amounts_are_exact() {
        let m = amount_match(Money::from_cents(10_000), Money::from_cents(10_000), &MatchingConfig::default());
        assert!(m.exact);
        assert!(m.close);
        assert!(m.variance.is_zero());
    }

    #[test]
    fn one_and_a_half_percent_off_is_not_close() {
        let m = amount_match(Money::from_cents(10_000), Money::from_cents(10_150), &MatchingConfig::default());
        assert!(!m.exact);
        assert!(!m.close);
        assert_eq!(m.variance, Money::from_cents(150));
    }

    #[test]
    fn half_percent_off_is_close_but_not_exact() {
        let m = amount_match(Money::from_cents(10_000), Money::from_cents(10_050), &MatchingConfig::default());
        assert!(!m.exact);
        assert!(m.close);
    }

    #[test]
    fn fixed_tolerance_alone_is_enough() {
        let config = MatchingConfig {
            amount_tolerance_fixed: Money::from_cents(500),
            amount_tolerance_percent: 0.0,
            ..MatchingConfig::default()
        };
        let m = amount_match(Money::from_cents(1_000), Money::from_cents(1_400), &config);
        assert!(m.exact);
        assert!(m.close);
    }

    #[test]
    fn both_zero_does_not_divide_by_zero() {
        let m = amount_match(Money::zero(), Money::zero(), &MatchingConfig::default());
        assert!(m.exact);
        assert!(m.close);
    }

    #[test]
    fn zero_against_nonzero_is_far() {
        let m = amount_match(Money::zero(), Money::from_cents(5_000), &MatchingConfig::default());
        assert!(!m.exact);
        assert!(!m.close);
    }

    #[test]
    fn three_days_apart_is_close() {
        let m = date_match(at(10, 0), at(13, 0), &MatchingConfig::default());
        assert!(!m.exact);
        assert!(m.close);
        assert_eq!(m.variance_days, 3.0);
    }

    #[test]
    fn same_day_different_hours_is_exact_and_fractional() {
        let m = date_match(at(10, 0), at(10, 12), &MatchingConfig::default());
        assert!(m.exact);
        assert_eq!(m.variance_days, 0.5);
    }

    #[test]
    fn tolerance_boundary_is_inclusive() {
        let config = MatchingConfig::default();
        assert!(within_date_tolerance(at(1, 0), at(8, 0), &config));
        assert!(!within_date_tolerance(at(1, 0), at(8, 1), &config));
    }
}
