//! Activity journal for ledger mutations
//!
//! The journal collects structured entries in memory instead of writing to
//! a console or file. Presentation layers decide whether and how to show them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Log level for journal entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level - repositioning details
    Debug,
    /// Info level - successful mutations
    Info,
    /// Warning level - rejected mutations
    Warn,
    /// Error level - fatal failures
    Error,
}

/// Ledger operation an entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AddGroup,
    AddUser,
    RemoveUser,
    PostTransaction,
}

/// A single journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Log level
    pub level: LogLevel,
    /// Wall-clock time the entry was created
    pub timestamp: DateTime<Utc>,
    /// Operation that produced the entry
    pub operation: Operation,
    /// Group name if known
    pub group: Option<String>,
    /// User name if applicable
    pub user: Option<String>,
    /// Log message
    pub message: String,
}

impl JournalEntry {
    /// Create a new entry stamped with the current time
    pub fn new(level: LogLevel, operation: Operation, message: String) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            operation,
            group: None,
            user: None,
            message,
        }
    }

    /// Attach the group the operation ran against
    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    /// Attach the user the operation ran against
    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    /// Override the timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Collecting journal with a minimum level and an optional size cap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    /// Collected entries, oldest first
    entries: VecDeque<JournalEntry>,
    min_level: LogLevel,
    capacity: Option<usize>,
}

impl Journal {
    /// Create a journal keeping entries at `min_level` and above
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            entries: VecDeque::new(),
            min_level,
            capacity: None,
        }
    }

    /// Keep only the newest `capacity` entries
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self.truncate();
        self
    }

    /// A journal recording every level
    pub fn all() -> Self {
        Self::new(LogLevel::Trace)
    }

    /// Record an entry if it meets the minimum level.
    ///
    /// Entries that cannot be stored for lack of memory are dropped.
    pub fn log(&mut self, entry: JournalEntry) {
        if self.should_log(entry.level) && self.entries.try_reserve(1).is_ok() {
            self.entries.push_back(entry);
            self.truncate();
        }
    }

    /// Whether an entry at `level` would be kept
    pub fn should_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn truncate(&mut self) {
        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                self.entries.pop_front();
            }
        }
    }

    /// Entries oldest first
    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> + '_ {
        self.entries.iter()
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the journal is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Lowest level kept
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Filter entries by log level
    pub fn filter_by_level(&self, level: LogLevel) -> Vec<&JournalEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    /// Filter entries by group name
    pub fn filter_by_group(&self, group: &str) -> Vec<&JournalEntry> {
        self.entries
            .iter()
            .filter(|e| e.group.as_deref() == Some(group))
            .collect()
    }

    /// Filter entries by operation
    pub fn filter_by_operation(&self, operation: Operation) -> Vec<&JournalEntry> {
        self.entries
            .iter()
            .filter(|e| e.operation == operation)
            .collect()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_basic() {
        let mut journal = Journal::default();
        journal.log(
            JournalEntry::new(LogLevel::Info, Operation::AddGroup, "group created".to_string())
                .with_group("dorm"),
        );

        assert_eq!(journal.len(), 1);
        let entry = journal.entries().next().unwrap();
        assert_eq!(entry.message, "group created");
        assert_eq!(entry.group.as_deref(), Some("dorm"));
    }

    #[test]
    fn test_journal_level_filtering() {
        let mut journal = Journal::new(LogLevel::Info);

        // Debug is below the threshold
        journal.log(JournalEntry::new(LogLevel::Debug, Operation::PostTransaction, "moved".to_string()));
        journal.log(JournalEntry::new(LogLevel::Warn, Operation::AddUser, "duplicate".to_string()));

        assert_eq!(journal.len(), 1);
        assert_eq!(journal.filter_by_level(LogLevel::Warn).len(), 1);
    }

    #[test]
    fn test_journal_capacity_drops_oldest() {
        let mut journal = Journal::all().with_capacity(2);
        for i in 0..4 {
            journal.log(JournalEntry::new(LogLevel::Info, Operation::AddUser, format!("entry {i}")));
        }

        let messages: Vec<&str> = journal.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["entry 2", "entry 3"]);
    }

    #[test]
    fn test_clear_keeps_threshold() {
        let mut journal = Journal::new(LogLevel::Warn);
        journal.log(JournalEntry::new(LogLevel::Error, Operation::AddGroup, "oom".to_string()));
        journal.clear();

        assert!(journal.is_empty());
        assert_eq!(journal.min_level(), LogLevel::Warn);
        assert!(!journal.should_log(LogLevel::Info));
    }

    #[test]
    fn test_filter_by_operation() {
        let mut journal = Journal::all();
        journal.log(JournalEntry::new(LogLevel::Info, Operation::AddUser, "a".to_string()));
        journal.log(JournalEntry::new(LogLevel::Info, Operation::RemoveUser, "b".to_string()));

        assert_eq!(journal.filter_by_operation(Operation::RemoveUser).len(), 1);
    }
}
