//! CLI command implementations.
//!
//! Loading and rendering are kept separate from printing so they can be
//! tested without capturing stdout.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context, Result};
use bankmatch_core::{AccountingTransaction, BankTransaction};
use bankmatch_engine::{BatchMatchResult, MatchSuggestion, Matcher, MatchingConfig, MultiTransactionMatch};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn load_config(path: Option<&Path>) -> Result<MatchingConfig> {
    let Some(path) = path else {
        return Ok(MatchingConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = MatchingConfig::from_toml(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!("Loaded matching config from {}", path.display());
    Ok(config)
}

pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records: Vec<T> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn load_inputs(bank: &Path, ledger: &Path) -> Result<(Vec<BankTransaction>, Vec<AccountingTransaction>)> {
    Ok((load_records(bank)?, load_records(ledger)?))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn cmd_match(config: &MatchingConfig, bank: &Path, ledger: &Path, json: bool) -> Result<()> {
    let (banks, accs) = load_inputs(bank, ledger)?;
    let result = Matcher::new(config.clone()).batch_auto_match(&banks, &accs)?;
    if json {
        return print_json(&result);
    }
    print!("{}", render_batch(&result));
    Ok(())
}

pub fn cmd_suggest(
    config: &MatchingConfig,
    bank: &Path,
    ledger: &Path,
    id: &str,
    json: bool,
) -> Result<()> {
    let (banks, accs) = load_inputs(bank, ledger)?;
    let Some(target) = banks.iter().find(|b| b.id == id) else {
        bail!("Bank transaction not found: {id}");
    };
    if target.is_reconciled {
        tracing::warn!("Bank transaction {id} is already reconciled");
    }

    let matcher = Matcher::new(config.clone());
    let singles = matcher.find_best_matches(target, &accs)?;
    let multis = if singles.is_empty() {
        matcher.find_multi_transaction_matches(target, &accs)?
    } else {
        Vec::new()
    };

    if json {
        return print_json(&serde_json::json!({
            "suggestions": singles,
            "multi_matches": multis,
        }));
    }
    print!("{}", render_suggestions(&singles, &multis));
    Ok(())
}

pub fn cmd_stats(config: &MatchingConfig, bank: &Path, ledger: &Path, json: bool) -> Result<()> {
    let (banks, accs) = load_inputs(bank, ledger)?;
    let stats = Matcher::new(config.clone()).match_statistics(&banks, &accs)?;
    if json {
        return print_json(&stats);
    }
    println!("{stats}");
    Ok(())
}

pub fn cmd_duplicates(config: &MatchingConfig, bank: &Path, threshold: f64, json: bool) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        bail!("Threshold must be between 0.0 and 1.0, got {threshold}");
    }
    let banks: Vec<BankTransaction> = load_records(bank)?;
    let pairs = Matcher::new(config.clone()).find_duplicate_bank_transactions(&banks, threshold);
    if json {
        return print_json(&pairs);
    }
    if pairs.is_empty() {
        println!("No likely duplicates.");
    }
    for (a, b) in &pairs {
        println!("{a} <-> {b}");
    }
    Ok(())
}

pub fn cmd_config(config: &MatchingConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn render_batch(result: &BatchMatchResult) -> String {
    let mut out = String::new();
    for (label, bucket) in [
        ("High confidence", &result.high_confidence),
        ("Medium confidence", &result.medium_confidence),
        ("Low confidence", &result.low_confidence),
    ] {
        let _ = writeln!(out, "{label} ({})", bucket.len());
        for s in bucket {
            let _ = writeln!(out, "  {}", suggestion_line(s));
        }
    }
    let _ = writeln!(out, "Multi-transaction ({})", result.multi_matches.len());
    for m in &result.multi_matches {
        let _ = writeln!(out, "  {}", multi_line(m));
    }
    out
}

pub fn render_suggestions(singles: &[MatchSuggestion], multis: &[MultiTransactionMatch]) -> String {
    let mut out = String::new();
    if singles.is_empty() && multis.is_empty() {
        out.push_str("No suggestions.\n");
        return out;
    }
    for (rank, s) in singles.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", rank + 1, suggestion_line(s));
        let _ = writeln!(out, "    {}", s.explanation);
    }
    for (rank, m) in multis.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", rank + 1, multi_line(m));
        let _ = writeln!(out, "    {}", m.reasons.join(", "));
    }
    out
}

fn suggestion_line(s: &MatchSuggestion) -> String {
    format!(
        "{} -> {}  score {:.1}  {} {}  variance {}",
        s.bank_transaction_id,
        s.accounting_transaction_id,
        s.match_score,
        s.confidence,
        s.match_type,
        s.amount_variance
    )
}

fn multi_line(m: &MultiTransactionMatch) -> String {
    format!(
        "{} -> [{}]  score {:.0}  {}  total {}",
        m.bank_transaction_id,
        m.accounting_transaction_ids.join(", "),
        m.match_score,
        m.confidence,
        m.total_amount
    )
}
