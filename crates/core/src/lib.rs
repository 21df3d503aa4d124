pub mod datetime;
pub mod money;
pub mod transaction;

pub use money::Money;
pub use transaction::{AccountingTransaction, BankTransaction};
