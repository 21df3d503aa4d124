use std::collections::HashSet;
use std::fmt;

use bankmatch_core::{AccountingTransaction, BankTransaction};
use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::matcher::Matcher;
use crate::model::{Confidence, MatchSuggestion, MultiTransactionMatch};

/// Best proposal per unreconciled bank line, bucketed by confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchMatchResult {
    pub high_confidence: Vec<MatchSuggestion>,
    pub medium_confidence: Vec<MatchSuggestion>,
    pub low_confidence: Vec<MatchSuggestion>,
    pub multi_matches: Vec<MultiTransactionMatch>,
}

impl BatchMatchResult {
    /// Bank lines that received any proposal.
    pub fn matched_count(&self) -> usize {
        self.high_confidence.len()
            + self.medium_confidence.len()
            + self.low_confidence.len()
            + self.multi_matches.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub total_bank_transactions: usize,
    pub total_accounting_transactions: usize,
    pub matchable: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
    pub multi_matches: usize,
    pub unmatchable: usize,
    /// Percentage of all supplied bank lines (reconciled ones included).
    pub estimated_match_rate: f64,
}

impl fmt::Display for MatchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Bank transactions:       {}",
            self.total_bank_transactions
        )?;
        writeln!(
            f,
            "Accounting transactions: {}",
            self.total_accounting_transactions
        )?;
        writeln!(f, "  High confidence:       {}", self.high_confidence)?;
        writeln!(f, "  Medium confidence:     {}", self.medium_confidence)?;
        writeln!(f, "  Low confidence:        {}", self.low_confidence)?;
        writeln!(f, "  Multi-transaction:     {}", self.multi_matches)?;
        writeln!(f, "Matchable:               {}", self.matchable)?;
        writeln!(f, "Unmatchable:             {}", self.unmatchable)?;
        write!(
            f,
            "Estimated match rate:    {:.1}%",
            self.estimated_match_rate
        )
    }
}

impl Matcher {
    /// Runs single then multi matching over every unreconciled bank line.
    ///
    /// Lines are processed strictly in input order. The ledger record behind a
    /// HIGH single match is reserved for the rest of the run; MEDIUM and LOW
    /// matches reserve nothing. Multi-match members are only reserved when
    /// `reserve_multi_match_members` is set.
    pub fn batch_auto_match(
        &self,
        bank_transactions: &[BankTransaction],
        accounting_transactions: &[AccountingTransaction],
    ) -> Result<BatchMatchResult, MatchError> {
        let mut result = BatchMatchResult::default();
        let mut used: HashSet<String> = HashSet::new();

        for bank in bank_transactions.iter().filter(|b| !b.is_reconciled) {
            let available = || {
                accounting_transactions
                    .iter()
                    .filter(|acc| !used.contains(acc.id.as_str()))
            };

            let suggestions = self.find_best_matches_in(bank, available())?;
            if let Some(best) = suggestions.into_iter().next() {
                tracing::debug!(
                    bank_id = %bank.id,
                    accounting_id = %best.accounting_transaction_id,
                    confidence = %best.confidence,
                    score = best.match_score,
                    "single match"
                );
                match best.confidence {
                    Confidence::High => {
                        used.insert(best.accounting_transaction_id.clone());
                        result.high_confidence.push(best);
                    }
                    Confidence::Medium => result.medium_confidence.push(best),
                    Confidence::Low => result.low_confidence.push(best),
                }
                continue;
            }

            let multi = self.find_multi_transaction_matches_in(bank, available())?;
            if let Some(best) = multi.into_iter().next() {
                if self.config().reserve_multi_match_members {
                    used.extend(best.accounting_transaction_ids.iter().cloned());
                }
                result.multi_matches.push(best);
            } else {
                tracing::debug!(bank_id = %bank.id, "no match");
            }
        }

        tracing::info!(
            high = result.high_confidence.len(),
            medium = result.medium_confidence.len(),
            low = result.low_confidence.len(),
            multi = result.multi_matches.len(),
            "batch auto-match complete"
        );
        Ok(result)
    }

    /// Re-runs [`Matcher::batch_auto_match`] and summarises the buckets.
    pub fn match_statistics(
        &self,
        bank_transactions: &[BankTransaction],
        accounting_transactions: &[AccountingTransaction],
    ) -> Result<MatchStatistics, MatchError> {
        let batch = self.batch_auto_match(bank_transactions, accounting_transactions)?;
        let total = bank_transactions.len();
        let matchable = batch.matched_count();

        Ok(MatchStatistics {
            total_bank_transactions: total,
            total_accounting_transactions: accounting_transactions.len(),
            matchable,
            high_confidence: batch.high_confidence.len(),
            medium_confidence: batch.medium_confidence.len(),
            low_confidence: batch.low_confidence.len(),
            multi_matches: batch.multi_matches.len(),
            unmatchable: total.saturating_sub(matchable),
            estimated_match_rate: if total == 0 {
                0.0
            } else {
                matchable as f64 / total as f64 * 100.0
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchingConfig;
    use bankmatch_core::Money;
    use chrono::{NaiveDate, NaiveDateTime};

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn bank(id: &str, cents: i64, d: u32) -> BankTransaction {
        BankTransaction::debit(id, day(d), Money::from_cents(cents), "Supplier payment")
    }

    fn acc(id: &str, cents: i64, d: u32) -> AccountingTransaction {
        AccountingTransaction::new(id)
            .with_amount(Money::from_cents(cents))
            .with_date(day(d))
            .with_description("Supplier payment")
    }

    #[test]
    fn reconciled_lines_are_skipped() {
        let mut settled = bank("b1", 10_000, 5);
        settled.is_reconciled = true;
        let result = Matcher::default()
            .batch_auto_match(&[settled], &[acc("a1", 10_000, 5)])
            .unwrap();
        assert_eq!(result.matched_count(), 0);
    }

    #[test]
    fn high_match_reserves_ledger_record() {
        let banks = vec![bank("b1", 10_000, 5), bank("b2", 10_000, 5)];
        let ledger = vec![acc("a1", 10_000, 5)];
        let result = Matcher::default().batch_auto_match(&banks, &ledger).unwrap();
        assert_eq!(result.high_confidence.len(), 1);
        assert_eq!(result.high_confidence[0].bank_transaction_id, "b1");
        // b2 finds nothing single, and one record cannot form a combination.
        assert_eq!(result.matched_count(), 1);
    }

    #[test]
    fn medium_match_does_not_reserve() {
        // Four days apart: 40 + 30 * (0.5 + 0.5 * 3/7) + 10 ~ 71.4 -> MEDIUM
        let banks = vec![bank("b1", 10_000, 1), bank("b2", 10_000, 1)];
        let ledger = vec![acc("a1", 10_000, 5)];
        let result = Matcher::default().batch_auto_match(&banks, &ledger).unwrap();
        assert_eq!(result.medium_confidence.len(), 2);
        assert!(result
            .medium_confidence
            .iter()
            .all(|s| s.accounting_transaction_id == "a1"));
    }

    #[test]
    fn falls_back_to_multi_match() {
        let banks = vec![bank("b1", 30_000, 5)];
        let ledger = vec![acc("a1", 10_000, 5), acc("a2", 20_000, 6)];
        let result = Matcher::default().batch_auto_match(&banks, &ledger).unwrap();
        assert!(result.high_confidence.is_empty());
        assert_eq!(result.multi_matches.len(), 1);
        assert_eq!(result.multi_matches[0].accounting_transaction_ids, vec!["a1", "a2"]);
    }

    #[test]
    fn multi_members_reused_unless_reservation_enabled() {
        let banks = vec![bank("b1", 30_000, 5), bank("b2", 10_000, 5)];
        let ledger = vec![acc("a1", 10_000, 5), acc("a2", 20_000, 5)];

        let open = Matcher::default().batch_auto_match(&banks, &ledger).unwrap();
        assert_eq!(open.multi_matches.len(), 1);
        assert_eq!(open.high_confidence.len(), 1);
        assert_eq!(open.high_confidence[0].accounting_transaction_id, "a1");

        let reserving = Matcher::new(MatchingConfig {
            reserve_multi_match_members: true,
            ..MatchingConfig::default()
        });
        let closed = reserving.batch_auto_match(&banks, &ledger).unwrap();
        assert_eq!(closed.multi_matches.len(), 1);
        assert!(closed.high_confidence.is_empty());
    }

    #[test]
    fn statistics_counts_and_rate() {
        let mut settled = bank("b0", 1, 1);
        settled.is_reconciled = true;
        let banks = vec![settled, bank("b1", 10_000, 5), bank("b2", 99_999, 20)];
        let ledger = vec![acc("a1", 10_000, 5)];
        let stats = Matcher::default().match_statistics(&banks, &ledger).unwrap();
        assert_eq!(stats.total_bank_transactions, 3);
        assert_eq!(stats.total_accounting_transactions, 1);
        assert_eq!(stats.high_confidence, 1);
        assert_eq!(stats.matchable, 1);
        assert_eq!(stats.unmatchable, 2);
        assert!((stats.estimated_match_rate - 100.0 / 3.0).abs() < 1e-9);
        assert!(stats.to_string().contains("Estimated match rate:    33.3%"));
    }

    #[test]
    fn statistics_on_empty_input() {
        let stats = Matcher::default().match_statistics(&[], &[]).unwrap();
        assert_eq!(stats.total_bank_transactions, 0);
        assert_eq!(stats.estimated_match_rate, 0.0);
        assert_eq!(stats.unmatchable, 0);
    }
}
