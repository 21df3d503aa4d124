use bankmatch_core::{AccountingTransaction, BankTransaction, Money};

use crate::config::MatchingConfig;
use crate::similarity::description_similarity;
use crate::tolerance::{amount_match, date_match};

/// Per-signal breakdown of a pair score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreDetails {
    pub amount_score: f64,
    pub date_score: f64,
    pub reference_score: f64,
    pub description_score: f64,
    pub amount_variance: Money,
    /// `None` when the ledger side carries no date.
    pub date_variance_days: Option<f64>,
    pub description_similarity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    pub score: f64,
    /// Ordered amount, date, reference, description.
    pub reasons: Vec<String>,
    pub details: ScoreDetails,
}

/// Scores one bank line against one ledger record.
///
/// The total is the plain sum of four independently bounded sub-scores, each
/// capped by its configured weight.
pub fn score(bank: &BankTransaction, acc: &AccountingTransaction, config: &MatchingConfig) -> PairScore {
    let mut reasons = Vec::new();

    let (amount_score, amount_variance) = score_amount(bank, acc, config, &mut reasons);
    let (date_score, date_variance_days) = score_date(bank, acc, config, &mut reasons);
    let reference_score = score_reference(bank, acc, config, &mut reasons);
    let (description_score, description_similarity) =
        score_description(bank, acc, config, &mut reasons);

    PairScore {
        score: amount_score + date_score + reference_score + description_score,
        reasons,
        details: ScoreDetails {
            amount_score,
            date_score,
            reference_score,
            description_score,
            amount_variance,
            date_variance_days,
            description_similarity,
        },
    }
}

fn score_amount(
    bank: &BankTransaction,
    acc: &AccountingTransaction,
    config: &MatchingConfig,
    reasons: &mut Vec<String>,
) -> (f64, Money) {
    let bank_amount = bank.amount();
    let m = amount_match(bank_amount, acc.amount(), config);

    let score = if m.exact {
        reasons.push("Exact amount match".to_string());
        config.amount_weight
    } else if m.close {
        reasons.push(format!("Amount within tolerance (variance: {})", m.variance));
        config.amount_weight * 0.8
    } else if bank_amount.is_zero() {
        0.0
    } else {
        // Partial credit decays linearly with relative variance.
        let decay = (1.0 - m.variance.to_f64() / bank_amount.abs().to_f64()).max(0.0);
        config.amount_weight * 0.3 * decay
    };

    (score, m.variance)
}

fn score_date(
    bank: &BankTransaction,
    acc: &AccountingTransaction,
    config: &MatchingConfig,
    reasons: &mut Vec<String>,
) -> (f64, Option<f64>) {
    let Some(acc_date) = acc.date else {
        return (0.0, None);
    };

    let m = date_match(bank.date, acc_date, config);
    let score = if m.exact {
        reasons.push("Same date".to_string());
        config.date_weight
    } else if m.close {
        reasons.push(format!("Date within {} days", format_days(m.variance_days)));
        let tolerance = f64::from(config.date_tolerance_days.max(1));
        config.date_weight * (0.5 + 0.5 * (1.0 - m.variance_days / tolerance))
    } else {
        0.0
    };

    (score, Some(m.variance_days))
}

fn score_reference(
    bank: &BankTransaction,
    acc: &AccountingTransaction,
    config: &MatchingConfig,
    reasons: &mut Vec<String>,
) -> f64 {
    let mut cheque_score = 0.0;
    if let (Some(a), Some(b)) = (bank.cheque_number(), acc.cheque_number()) {
        if a == b {
            reasons.push("Cheque number match".to_string());
            cheque_score = config.reference_weight;
        }
    }

    let mut reference_score = 0.0;
    if let (Some(a), Some(b)) = (bank.reference(), acc.reference()) {
        let a = a.to_lowercase();
        let b = b.to_lowercase();
        if a == b {
            reasons.push("Exact reference match".to_string());
            reference_score = config.reference_weight;
        } else if a.contains(&b) || b.contains(&a) {
            reasons.push("Partial reference match".to_string());
            reference_score = config.reference_weight * 0.8;
        }
    }

    f64::max(cheque_score, reference_score)
}

fn score_description(
    bank: &BankTransaction,
    acc: &AccountingTransaction,
    config: &MatchingConfig,
    reasons: &mut Vec<String>,
) -> (f64, f64) {
    if !config.enable_fuzzy_matching {
        return (0.0, 0.0);
    }
    let Some(acc_description) = acc.description() else {
        return (0.0, 0.0);
    };

    let sim = description_similarity(&bank.description, acc_description);
    let (fraction, label) = if sim > 0.9 {
        (1.0, "Very high")
    } else if sim > 0.7 {
        (0.8, "High")
    } else if sim > 0.5 {
        (0.5, "Moderate")
    } else if sim > 0.3 {
        (0.3, "Low")
    } else {
        return (0.0, sim);
    };

    reasons.push(format!(
        "{label} description similarity ({:.0}%)",
        sim * 100.0
    ));
    (config.description_weight * fraction, sim)
}

fn format_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{days:.0}")
    } else {
        format!("{days:.1}")
    }
}
