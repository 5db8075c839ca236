//! Ledger facade tying groups, users and transaction logs together

use crate::config::LedgerConfig;
use crate::directory::GroupDirectory;
use crate::error::{try_own, LedgerError};
use crate::group::{Group, Removal};
use crate::journal::{Journal, JournalEntry, LogLevel, Operation};
use crate::types::{format_amount, Amount, Reposition, Transaction, User};

/// Entry point for presentation layers.
///
/// Every mutation is journaled. Queries never are.
#[derive(Debug, Clone)]
pub struct Ledger {
    directory: GroupDirectory,
    journal: Journal,
    config: LedgerConfig,
}

impl Ledger {
    /// Create an empty ledger with the given configuration
    pub fn new(config: LedgerConfig) -> Self {
        let mut journal = Journal::new(config.journal_level);
        if let Some(capacity) = config.journal_capacity {
            journal = journal.with_capacity(capacity);
        }
        Self {
            directory: GroupDirectory::new(),
            journal,
            config,
        }
    }

    /// Create a builder for constructing a ledger
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::new()
    }

    /// Configuration the ledger was built with
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Journal of mutations so far
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Read-only view of every group
    pub fn directory(&self) -> &GroupDirectory {
        &self.directory
    }

    /// Create an empty group after all existing ones
    pub fn add_group(&mut self, group_name: &str) -> Result<(), LedgerError> {
        let result = self.directory.add_group(group_name).map(|_| ());
        self.record(
            Operation::AddGroup,
            group_name,
            None,
            result.as_ref().map(|_| "group created".to_string()),
        );
        result
    }

    /// Look up a group by name
    pub fn find_group(&self, group_name: &str) -> Result<&Group, LedgerError> {
        Ok(self.directory.find_group(group_name)?)
    }

    /// Group names in creation order
    pub fn list_groups(&self) -> impl Iterator<Item = &str> + '_ {
        self.directory.list_groups()
    }

    /// Add a user with a zero balance to a group
    pub fn add_user(&mut self, group_name: &str, user_name: &str) -> Result<(), LedgerError> {
        let result = self
            .directory
            .find_group_mut(group_name)
            .map_err(LedgerError::from)
            .and_then(|group| group.add_user(user_name));
        self.record(
            Operation::AddUser,
            group_name,
            Some(user_name),
            result.as_ref().map(|position| format!("user added at position {position}")),
        );
        result.map(|_| ())
    }

    /// Look up a user within a group
    pub fn find_user(&self, group_name: &str, user_name: &str) -> Result<&User, LedgerError> {
        Ok(self.find_group(group_name)?.users().find_user(user_name)?)
    }

    /// Remove a user and every transaction posted for it
    pub fn remove_user(&mut self, group_name: &str, user_name: &str) -> Result<Removal, LedgerError> {
        let result = self
            .directory
            .find_group_mut(group_name)
            .map_err(LedgerError::from)
            .and_then(|group| group.remove_user(user_name));
        self.record(
            Operation::RemoveUser,
            group_name,
            Some(user_name),
            result.as_ref().map(|removal| {
                format!(
                    "user removed with balance {}, {} transactions purged",
                    format_amount(removal.user.balance),
                    removal.purged
                )
            }),
        );
        result
    }

    /// Users of a group in ascending-balance order
    pub fn list_users(&self, group_name: &str) -> Result<impl Iterator<Item = &User> + '_, LedgerError> {
        Ok(self.find_group(group_name)?.users().list_users())
    }

    /// Current balance of a user within a group
    pub fn balance_of(&self, group_name: &str, user_name: &str) -> Result<Amount, LedgerError> {
        Ok(self.find_group(group_name)?.users().balance_of(user_name)?)
    }

    /// Names of every user sharing the lowest balance, in ledger order
    pub fn least_paid(&self, group_name: &str) -> Result<Vec<&str>, LedgerError> {
        let users = self.find_group(group_name)?.users();
        Ok(users.least_paid()?.map(User::name).collect())
    }

    /// Apply `amount` to a user's balance and log the transaction
    pub fn post_transaction(
        &mut self,
        group_name: &str,
        user_name: &str,
        amount: Amount,
    ) -> Result<Reposition, LedgerError> {
        let result = self
            .directory
            .find_group_mut(group_name)
            .map_err(LedgerError::from)
            .and_then(|group| group.post_transaction(user_name, amount));
        self.record(
            Operation::PostTransaction,
            group_name,
            Some(user_name),
            result.as_ref().map(|_| format!("posted {}", format_amount(amount))),
        );
        if let Ok(reposition) = &result {
            let (level, message) = if reposition.moved() {
                (
                    LogLevel::Debug,
                    format!("repositioned from {} to {}", reposition.from, reposition.to),
                )
            } else {
                (LogLevel::Trace, format!("kept position {}", reposition.from))
            };
            if self.journal.should_log(level) {
                self.record_entry(level, Operation::PostTransaction, message, group_name, Some(user_name));
            }
        }
        result
    }

    /// Up to `n` most recent transactions of a group, newest first
    pub fn recent(&self, group_name: &str, n: usize) -> Result<impl Iterator<Item = &Transaction> + '_, LedgerError> {
        Ok(self.find_group(group_name)?.transactions().recent(n))
    }

    fn record(
        &mut self,
        operation: Operation,
        group_name: &str,
        user_name: Option<&str>,
        outcome: Result<String, &LedgerError>,
    ) {
        let (level, message) = match outcome {
            Ok(message) => (LogLevel::Info, message),
            Err(e) if e.is_fatal() => {
                // Names may be what exhausted memory, so fatal entries go without them
                if self.journal.should_log(LogLevel::Error) {
                    self.journal
                        .log(JournalEntry::new(LogLevel::Error, operation, e.to_string()));
                }
                return;
            }
            Err(e) => (LogLevel::Warn, e.to_string()),
        };
        if self.journal.should_log(level) {
            self.record_entry(level, operation, message, group_name, user_name);
        }
    }

    fn record_entry(
        &mut self,
        level: LogLevel,
        operation: Operation,
        message: String,
        group_name: &str,
        user_name: Option<&str>,
    ) {
        let mut entry = JournalEntry::new(level, operation, message);
        entry.group = try_own(group_name, "journal group name").ok();
        entry.user = user_name.and_then(|name| try_own(name, "journal user name").ok());
        self.journal.log(entry);
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

/// Builder for constructing ledgers with a fluent API
#[derive(Debug, Clone, Default)]
pub struct LedgerBuilder {
    config: LedgerConfig,
    groups: Vec<String>,
}

impl LedgerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the lowest journaled level
    pub fn with_journal_level(mut self, level: LogLevel) -> Self {
        self.config.journal_level = level;
        self
    }

    /// Cap the number of journal entries kept
    pub fn with_journal_capacity(mut self, capacity: usize) -> Self {
        self.config.journal_capacity = Some(capacity);
        self
    }

    /// Groups to create, in order, when the ledger is built
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Build the ledger, failing on duplicate pre-declared groups
    pub fn build(self) -> Result<Ledger, LedgerError> {
        let mut ledger = Ledger::new(self.config);
        for group in &self.groups {
            ledger.add_group(group)?;
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rust_decimal_macros::dec;

    fn dorm() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.add_group("dorm").unwrap();
        for name in ["amy", "bob", "cas"] {
            ledger.add_user("dorm", name).unwrap();
        }
        ledger
    }

    fn names<'a>(users: impl Iterator<Item = &'a User>) -> Vec<&'a str> {
        users.map(User::name).collect()
    }

    #[test]
    fn test_post_and_query() {
        let mut ledger = dorm();
        ledger.post_transaction("dorm", "amy", dec!(10)).unwrap();

        assert_eq!(names(ledger.list_users("dorm").unwrap()), vec!["bob", "cas", "amy"]);
        assert_eq!(ledger.least_paid("dorm").unwrap(), vec!["bob", "cas"]);
        assert_eq!(ledger.balance_of("dorm", "amy").unwrap(), dec!(10));
    }

    #[test]
    fn test_unknown_group() {
        let mut ledger = dorm();
        let err = ledger.post_transaction("trip", "amy", dec!(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(ledger.recent("trip", 1).is_err());
    }

    #[test]
    fn test_mutations_are_journaled() {
        let mut ledger = dorm();
        ledger.add_user("dorm", "amy").unwrap_err();
        ledger.post_transaction("dorm", "bob", dec!(2.5)).unwrap();

        let journal = ledger.journal();
        assert_eq!(journal.filter_by_operation(Operation::AddUser).len(), 4);
        assert_eq!(journal.filter_by_level(LogLevel::Warn).len(), 1);

        let posts = journal.filter_by_operation(Operation::PostTransaction);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].message, "posted 2.50");
    }

    #[test]
    fn test_debug_journal_records_repositioning() {
        let mut ledger = Ledger::builder()
            .with_journal_level(LogLevel::Debug)
            .with_groups(["dorm"])
            .build()
            .unwrap();
        ledger.add_user("dorm", "amy").unwrap();
        ledger.add_user("dorm", "bob").unwrap();
        ledger.post_transaction("dorm", "amy", dec!(1)).unwrap();

        let debug = ledger.journal().filter_by_level(LogLevel::Debug);
        assert_eq!(debug.len(), 1);
        assert_eq!(debug[0].message, "repositioned from 0 to 1");
    }

    #[test]
    fn test_trace_journal_records_unmoved_posts() {
        let mut ledger = Ledger::builder()
            .with_journal_level(LogLevel::Trace)
            .with_journal_capacity(16)
            .with_groups(["dorm"])
            .build()
            .unwrap();
        ledger.add_user("dorm", "amy").unwrap();
        ledger.post_transaction("dorm", "amy", dec!(3)).unwrap();

        let trace = ledger.journal().filter_by_level(LogLevel::Trace);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].message, "kept position 0");
        assert_eq!(ledger.config().journal_level, LogLevel::Trace);
        assert_eq!(ledger.config().journal_capacity, Some(16));
    }

    #[test]
    fn test_directory_view() {
        let mut ledger = dorm();
        ledger.add_group("trip").unwrap();

        let sizes: Vec<(&str, usize)> = ledger
            .directory()
            .iter()
            .map(|g| (g.name(), g.users().len()))
            .collect();
        assert_eq!(sizes, vec![("dorm", 3), ("trip", 0)]);
    }

    #[test]
    fn test_builder_rejects_duplicate_groups() {
        let err = Ledger::builder().with_groups(["dorm", "dorm"]).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateGroup);
    }
}
