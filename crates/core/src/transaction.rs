use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// One line of an imported bank statement.
///
/// Exactly one of `debit_amount` / `credit_amount` is expected to be set; when
/// both are present the debit wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankTransaction {
    pub id: String,
    #[serde(with = "crate::datetime")]
    pub date: NaiveDateTime,
    #[serde(default, alias = "debitAmount")]
    pub debit_amount: Option<Money>,
    #[serde(default, alias = "creditAmount")]
    pub credit_amount: Option<Money>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, alias = "chequeNumber")]
    pub cheque_number: Option<String>,
    #[serde(default, alias = "isReconciled")]
    pub is_reconciled: bool,
}

impl BankTransaction {
    pub fn debit(id: &str, date: NaiveDateTime, amount: Money, description: &str) -> Self {
        BankTransaction {
            id: id.to_string(),
            date,
            debit_amount: Some(amount),
            credit_amount: None,
            description: description.to_string(),
            reference: None,
            cheque_number: None,
            is_reconciled: false,
        }
    }

    pub fn credit(id: &str, date: NaiveDateTime, amount: Money, description: &str) -> Self {
        BankTransaction {
            id: id.to_string(),
            date,
            debit_amount: None,
            credit_amount: Some(amount),
            description: description.to_string(),
            reference: None,
            cheque_number: None,
            is_reconciled: false,
        }
    }

    /// The amount used for matching: debit if present, else credit, else zero.
    pub fn amount(&self) -> Money {
        self.debit_amount
            .or(self.credit_amount)
            .unwrap_or_else(Money::zero)
    }

    pub fn reference(&self) -> Option<&str> {
        non_empty(&self.reference)
    }

    pub fn cheque_number(&self) -> Option<&str> {
        non_empty(&self.cheque_number)
    }
}

/// A ledger-side record (invoice, bill, payment) that may explain a bank line.
///
/// Every field except `id` is optional. Ledgers disagree on whether the value
/// lives under `amount` or `total_amount`; see [`AccountingTransaction::amount`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountingTransaction {
    pub id: String,
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default, alias = "totalAmount")]
    pub total_amount: Option<Money>,
    #[serde(default, with = "crate::datetime::option")]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, alias = "chequeNumber")]
    pub cheque_number: Option<String>,
}

impl AccountingTransaction {
    pub fn new(id: &str) -> Self {
        AccountingTransaction {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_total_amount(mut self, total: Money) -> Self {
        self.total_amount = Some(total);
        self
    }

    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_reference(mut self, reference: &str) -> Self {
        self.reference = Some(reference.to_string());
        self
    }

    pub fn with_cheque_number(mut self, cheque: &str) -> Self {
        self.cheque_number = Some(cheque.to_string());
        self
    }

    /// `amount` if present, else `total_amount`, else zero.
    pub fn amount(&self) -> Money {
        self.amount
            .or(self.total_amount)
            .unwrap_or_else(Money::zero)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn reference(&self) -> Option<&str> {
        non_empty(&self.reference)
    }

    pub fn cheque_number(&self) -> Option<&str> {
        non_empty(&self.cheque_number)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
