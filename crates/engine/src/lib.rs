//! Bank reconciliation auto-matching.
//!
//! Pure, synchronous engine: callers hand in bank statement lines and ledger
//! records, and get back ranked proposals. Nothing here performs I/O or keeps
//! state between calls.

pub mod batch;
pub mod combinations;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod matcher;
pub mod model;
pub mod scoring;
pub mod similarity;
pub mod tolerance;

pub use batch::{BatchMatchResult, MatchStatistics};
pub use config::MatchingConfig;
pub use error::MatchError;
pub use matcher::Matcher;
pub use model::{Confidence, MatchSuggestion, MatchType, MultiTransactionMatch};
pub use scoring::{score, PairScore, ScoreDetails};
