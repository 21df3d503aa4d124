use bankmatch_core::Money;
use serde::{Deserialize, Serialize};

use crate::error::MatchError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Tuning knobs for one matching run.
///
/// The four weights are used as per-signal score ceilings; they are expected
/// to add up to 100 but nothing enforces it. Likewise the thresholds should
/// satisfy `minimum <= medium <= high`. Out-of-order thresholds are reported
/// by [`MatchingConfig::ordering_warnings`] and otherwise used as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub amount_weight: f64,
    pub date_weight: f64,
    pub reference_weight: f64,
    pub description_weight: f64,

    pub minimum_match_score: f64,
    pub high_confidence_threshold: f64,
    pub medium_confidence_threshold: f64,

    /// Relative tolerance as a fraction (0.01 = 1%).
    pub amount_tolerance_percent: f64,
    /// Absolute tolerance in currency units.
    pub amount_tolerance_fixed: Money,
    pub date_tolerance_days: u32,

    pub enable_fuzzy_matching: bool,
    pub enable_multi_transaction_matching: bool,
    /// Accepted for compatibility with stored settings; no matcher reads it.
    pub enable_pattern_matching: bool,

    /// Reserve the members of a filed multi-match so later bank lines in the
    /// same batch cannot claim them. Off by default.
    pub reserve_multi_match_members: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            amount_weight: 40.0,
            date_weight: 30.0,
            reference_weight: 20.0,
            description_weight: 10.0,
            minimum_match_score: 50.0,
            high_confidence_threshold: 80.0,
            medium_confidence_threshold: 65.0,
            amount_tolerance_percent: 0.01,
            amount_tolerance_fixed: Money::from_cents(1),
            date_tolerance_days: 7,
            enable_fuzzy_matching: true,
            enable_multi_transaction_matching: true,
            enable_pattern_matching: true,
            reserve_multi_match_members: false,
        }
    }
}

impl MatchingConfig {
    /// Parses a (possibly partial) TOML document over the defaults.
    pub fn from_toml(toml_content: &str) -> Result<Self, MatchError> {
        let config: MatchingConfig =
            toml::from_str(toml_content).map_err(|e| MatchError::ConfigParse(e.to_string()))?;
        for warning in config.ordering_warnings() {
            tracing::warn!("{warning}");
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, MatchError> {
        toml::to_string(self).map_err(|e| MatchError::ConfigRender(e.to_string()))
    }

    pub fn total_weight(&self) -> f64 {
        self.amount_weight + self.date_weight + self.reference_weight + self.description_weight
    }

    pub fn ordering_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.minimum_match_score > self.medium_confidence_threshold {
            warnings.push(format!(
                "minimum_match_score ({}) is above medium_confidence_threshold ({})",
                self.minimum_match_score, self.medium_confidence_threshold
            ));
        }
        if self.medium_confidence_threshold > self.high_confidence_threshold {
            warnings.push(format!(
                "medium_confidence_threshold ({}) is above high_confidence_threshold ({})",
                self.medium_confidence_threshold, self.high_confidence_threshold
            ));
        }
        if (self.total_weight() - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            warnings.push(format!(
                "weights sum to {} rather than 100; scores are not normalised",
                self.total_weight()
            ));
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = MatchingConfig::default();
        assert_eq!(c.total_weight(), 100.0);
        assert_eq!(c.minimum_match_score, 50.0);
        assert_eq!(c.medium_confidence_threshold, 65.0);
        assert_eq!(c.high_confidence_threshold, 80.0);
        assert_eq!(c.amount_tolerance_fixed, Money::from_cents(1));
        assert_eq!(c.date_tolerance_days, 7);
        assert!(c.enable_fuzzy_matching && c.enable_multi_transaction_matching);
        assert!(!c.reserve_multi_match_members);
        assert!(c.ordering_warnings().is_empty());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = MatchingConfig::from_toml(
            r#"
date_tolerance_days = 3
enable_multi_transaction_matching = false
amount_tolerance_fixed = 0.50
"#,
        )
        .unwrap();
        assert_eq!(c.date_tolerance_days, 3);
        assert!(!c.enable_multi_transaction_matching);
        assert_eq!(c.amount_tolerance_fixed, Money::from_cents(50));
        assert_eq!(c.amount_weight, 40.0);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(MatchingConfig::from_toml("").unwrap(), MatchingConfig::default());
    }

    #[test]
    fn rejects_wrong_types() {
        let err = MatchingConfig::from_toml("date_tolerance_days = \"soon\"").unwrap_err();
        assert!(matches!(err, MatchError::ConfigParse(_)));
    }

    #[test]
    fn toml_round_trip() {
        let mut c = MatchingConfig::default();
        c.high_confidence_threshold = 90.0;
        c.reserve_multi_match_members = true;
        let rendered = c.to_toml().unwrap();
        assert_eq!(MatchingConfig::from_toml(&rendered).unwrap(), c);
    }

    #[test]
    fn out_of_order_thresholds_are_reported_not_fixed() {
        let c = MatchingConfig::from_toml(
            r#"
minimum_match_score = 70
medium_confidence_threshold = 60
high_confidence_threshold = 55
"#,
        )
        .unwrap();
        assert_eq!(c.ordering_warnings().len(), 2);
        assert_eq!(c.high_confidence_threshold, 55.0);
    }

    #[test]
    fn fractional_weights_summing_to_100_are_accepted() {
        let c = MatchingConfig::from_toml(
            r#"
amount_weight = 33.3
date_weight = 33.3
reference_weight = 33.4
description_weight = 0
"#,
        )
        .unwrap();
        assert!(c.ordering_warnings().is_empty());

        let off = MatchingConfig {
            description_weight: 11.0,
            ..MatchingConfig::default()
        };
        assert_eq!(off.ordering_warnings().len(), 1);
    }
}
