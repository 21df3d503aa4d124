use bankmatch_core::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score at or above which a multi-transaction match is `High`. Independent of
/// the configured single-match thresholds.
pub const MULTI_MATCH_HIGH_CONFIDENCE_SCORE: f64 = 80.0;
pub const MULTI_MATCH_EXACT_SCORE: f64 = 90.0;
pub const MULTI_MATCH_CLOSE_SCORE: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "HIGH"),
            Confidence::Medium => write!(f, "MEDIUM"),
            Confidence::Low => write!(f, "LOW"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchType {
    Exact,
    Fuzzy,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Exact => write!(f, "EXACT"),
            MatchType::Fuzzy => write!(f, "FUZZY"),
        }
    }
}

/// One proposed bank ↔ ledger pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    pub bank_transaction_id: String,
    pub accounting_transaction_id: String,
    /// Sum of the four sub-scores; not capped.
    pub match_score: f64,
    pub reasons: Vec<String>,
    pub amount_match: bool,
    pub date_match: bool,
    pub description_match: bool,
    pub confidence: Confidence,
    pub match_type: MatchType,
    pub amount_variance: Money,
    /// `None` when the ledger record has no date.
    pub date_variance_days: Option<f64>,
    pub description_similarity: f64,
    pub explanation: String,
}

/// A bank line explained by the sum of several ledger records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTransactionMatch {
    pub bank_transaction_id: String,
    pub accounting_transaction_ids: Vec<String>,
    pub match_score: f64,
    pub total_amount: Money,
    pub amount_variance: Money,
    pub reasons: Vec<String>,
    pub confidence: Confidence,
}
