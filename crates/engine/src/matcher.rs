use bankmatch_core::datetime::days_between;
use bankmatch_core::{AccountingTransaction, BankTransaction, Money};

use crate::combinations::combinations;
use crate::config::MatchingConfig;
use crate::error::MatchError;
use crate::model::{
    Confidence, MatchSuggestion, MatchType, MultiTransactionMatch, MULTI_MATCH_CLOSE_SCORE,
    MULTI_MATCH_EXACT_SCORE, MULTI_MATCH_HIGH_CONFIDENCE_SCORE,
};
use crate::scoring::score;
use crate::tolerance::{amount_match, within_date_tolerance};

/// Nearest-by-date candidates considered for multi-transaction search.
pub const MULTI_MATCH_POOL_SIZE: usize = 10;
/// Largest number of ledger records combined into one multi-match.
pub const MULTI_MATCH_MAX_MEMBERS: usize = 5;
/// Multi-matches returned per bank transaction.
pub const MULTI_MATCH_MAX_RESULTS: usize = 5;

/// Stateless matcher bound to one [`MatchingConfig`].
///
/// Every call is an independent pure query over the slices passed in.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchingConfig,
}

impl Matcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Ranked single-record suggestions for `bank`, best first.
    ///
    /// Only candidates scoring at least `minimum_match_score` are returned.
    /// Ties keep input order.
    pub fn find_best_matches(
        &self,
        bank: &BankTransaction,
        candidates: &[AccountingTransaction],
    ) -> Result<Vec<MatchSuggestion>, MatchError> {
        self.find_best_matches_in(bank, candidates.iter())
    }

    pub(crate) fn find_best_matches_in<'a>(
        &self,
        bank: &BankTransaction,
        candidates: impl Iterator<Item = &'a AccountingTransaction>,
    ) -> Result<Vec<MatchSuggestion>, MatchError> {
        check_bank_id(bank)?;

        let mut suggestions = Vec::new();
        for acc in candidates {
            check_accounting_id(acc)?;
            let scored = score(bank, acc, &self.config);
            tracing::trace!(
                bank_id = %bank.id,
                accounting_id = %acc.id,
                score = scored.score,
                "scored candidate"
            );
            if scored.score < self.config.minimum_match_score {
                continue;
            }

            let d = &scored.details;
            let explanation = format!(
                "Match score: {:.0}% - {}",
                scored.score,
                scored.reasons.join(", ")
            );
            suggestions.push(MatchSuggestion {
                bank_transaction_id: bank.id.clone(),
                accounting_transaction_id: acc.id.clone(),
                match_score: scored.score,
                amount_match: d.amount_score >= self.config.amount_weight * 0.8,
                date_match: d.date_score >= self.config.date_weight * 0.8,
                description_match: d.description_score >= self.config.description_weight * 0.5,
                confidence: self.confidence_for(scored.score),
                match_type: if d.amount_score == self.config.amount_weight {
                    MatchType::Exact
                } else {
                    MatchType::Fuzzy
                },
                amount_variance: d.amount_variance,
                date_variance_days: d.date_variance_days,
                description_similarity: d.description_similarity,
                explanation,
                reasons: scored.reasons,
            });
        }

        // Vec::sort_by is stable.
        suggestions.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        Ok(suggestions)
    }

    /// Combinations of 2..=5 ledger records whose summed amount explains a
    /// single bank line (bulk or consolidated payments). At most five results,
    /// best first.
    ///
    /// The search only looks at the ten candidates nearest in date, and every
    /// member must individually sit within the date tolerance.
    pub fn find_multi_transaction_matches(
        &self,
        bank: &BankTransaction,
        candidates: &[AccountingTransaction],
    ) -> Result<Vec<MultiTransactionMatch>, MatchError> {
        self.find_multi_transaction_matches_in(bank, candidates.iter())
    }

    pub(crate) fn find_multi_transaction_matches_in<'a>(
        &self,
        bank: &BankTransaction,
        candidates: impl Iterator<Item = &'a AccountingTransaction>,
    ) -> Result<Vec<MultiTransactionMatch>, MatchError> {
        check_bank_id(bank)?;
        if !self.config.enable_multi_transaction_matching {
            return Ok(Vec::new());
        }

        // Undated records can never satisfy the per-member date check, so they
        // are kept out of the pool entirely.
        let mut pool: Vec<(&AccountingTransaction, f64)> = Vec::new();
        for acc in candidates {
            check_accounting_id(acc)?;
            if let Some(date) = acc.date {
                pool.push((acc, days_between(bank.date, date)));
            }
        }
        pool.sort_by(|a, b| a.1.total_cmp(&b.1));
        pool.truncate(MULTI_MATCH_POOL_SIZE);
        let pool: Vec<&AccountingTransaction> = pool.into_iter().map(|(acc, _)| acc).collect();

        let bank_amount = bank.amount();
        let mut matches = Vec::new();

        for size in 2..=MULTI_MATCH_MAX_MEMBERS.min(pool.len()) {
            for combo in combinations(&pool, size) {
                let total: Money = combo.iter().map(|acc| acc.amount()).sum();
                let m = amount_match(bank_amount, total, &self.config);
                if !m.close {
                    continue;
                }
                let all_dated_within = combo.iter().all(|acc| {
                    acc.date
                        .is_some_and(|date| within_date_tolerance(bank.date, date, &self.config))
                });
                if !all_dated_within {
                    continue;
                }

                let match_score = if m.exact {
                    MULTI_MATCH_EXACT_SCORE
                } else {
                    MULTI_MATCH_CLOSE_SCORE
                };
                matches.push(MultiTransactionMatch {
                    bank_transaction_id: bank.id.clone(),
                    accounting_transaction_ids: combo.iter().map(|acc| acc.id.clone()).collect(),
                    match_score,
                    total_amount: total,
                    amount_variance: m.variance,
                    reasons: vec![
                        format!("{size} transactions combined"),
                        format!("Total amount: {total}"),
                        if m.exact {
                            "Exact amount match".to_string()
                        } else {
                            format!("Amount within tolerance (variance: {})", m.variance)
                        },
                        format!(
                            "All dates within {} days",
                            self.config.date_tolerance_days
                        ),
                    ],
                    confidence: if match_score >= MULTI_MATCH_HIGH_CONFIDENCE_SCORE {
                        Confidence::High
                    } else {
                        Confidence::Medium
                    },
                });
            }
        }

        matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        matches.truncate(MULTI_MATCH_MAX_RESULTS);
        tracing::debug!(
            bank_id = %bank.id,
            pool = pool.len(),
            found = matches.len(),
            "multi-transaction search"
        );
        Ok(matches)
    }

    fn confidence_for(&self, score: f64) -> Confidence {
        if score >= self.config.high_confidence_threshold {
            Confidence::High
        } else if score >= self.config.medium_confidence_threshold {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

fn check_bank_id(bank: &BankTransaction) -> Result<(), MatchError> {
    if bank.id.trim().is_empty() {
        return Err(MatchError::MissingIdentifier { side: "Bank" });
    }
    Ok(())
}

fn check_accounting_id(acc: &AccountingTransaction) -> Result<(), MatchError> {
    if acc.id.trim().is_empty() {
        return Err(MatchError::MissingIdentifier { side: "Accounting" });
    }
    Ok(())
}
