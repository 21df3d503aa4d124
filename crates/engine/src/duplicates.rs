use bankmatch_core::BankTransaction;

use crate::matcher::Matcher;
use crate::similarity::description_similarity;
use crate::tolerance::{amount_match, within_date_tolerance};

impl Matcher {
    /// Likely duplicate lines within one statement import.
    ///
    /// Returns id pairs, in input order, whose amounts are an exact tolerance
    /// match, whose dates fall within the date tolerance, and whose description
    /// similarity is at least `threshold`. Reconciled lines are included; a
    /// re-imported line usually duplicates a settled one.
    pub fn find_duplicate_bank_transactions(
        &self,
        transactions: &[BankTransaction],
        threshold: f64,
    ) -> Vec<(String, String)> {
        let config = self.config();
        let mut duplicates = Vec::new();

        for (i, t1) in transactions.iter().enumerate() {
            for t2 in &transactions[i + 1..] {
                if !amount_match(t1.amount(), t2.amount(), config).exact {
                    continue;
                }
                if !within_date_tolerance(t1.date, t2.date, config) {
                    continue;
                }
                if description_similarity(&t1.description, &t2.description) >= threshold {
                    duplicates.push((t1.id.clone(), t2.id.clone()));
                }
            }
        }

        if !duplicates.is_empty() {
            tracing::debug!(pairs = duplicates.len(), "possible duplicate bank lines");
        }
        duplicates
    }
}
