//! Shared-expense ledger
//!
//! An in-memory ledger of named groups, the users in each group kept sorted
//! by running balance, and a newest-first log of balance-changing transactions.

pub mod config;
pub mod directory;
pub mod error;
pub mod group;
pub mod journal;
pub mod ledger;
pub mod transaction_log;
pub mod types;
pub mod user_ledger;

// Re-export core types
pub use config::LedgerConfig;
pub use directory::GroupDirectory;
pub use error::{ConfigError, ErrorKind, FatalError, GroupError, LedgerError, UserError};
pub use group::{Group, Removal};
pub use journal::{Journal, JournalEntry, LogLevel, Operation};
pub use ledger::{Ledger, LedgerBuilder};
pub use transaction_log::TransactionLog;
pub use types::{format_amount, Amount, Reposition, Transaction, User, DISPLAY_SCALE};
pub use user_ledger::UserLedger;
