//! Per-group transaction history, newest first

use crate::error::FatalError;
use crate::types::{Amount, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Append-ordered record of transactions with the most recent at the head
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionLog {
    records: VecDeque<Transaction>,
}

impl TransactionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for one more record so a following `append` cannot fail
    pub fn reserve_slot(&mut self) -> Result<(), FatalError> {
        self.records
            .try_reserve(1)
            .map_err(FatalError::out_of_memory("transaction record"))
    }

    /// Prepend a new transaction. The caller guarantees `user_name` is a member.
    pub fn post(&mut self, user_name: &str, amount: Amount) -> Result<(), FatalError> {
        self.append(Transaction::try_new(user_name, amount)?)
    }

    /// Prepend a prebuilt record. Cannot fail after a successful `reserve_slot`.
    pub fn append(&mut self, transaction: Transaction) -> Result<(), FatalError> {
        self.reserve_slot()?;
        self.records.push_front(transaction);
        Ok(())
    }

    /// Up to `n` records, newest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Transaction> + '_ {
        self.records.iter().take(n)
    }

    /// Remove every record for `user_name`, keeping the order of the rest.
    /// Returns how many records were dropped.
    pub fn purge(&mut self, user_name: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|tx| tx.user_name != user_name);
        before - self.records.len()
    }

    /// All records, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.records.iter()
    }

    /// Number of records posted for `user_name`
    pub fn count_for(&self, user_name: &str) -> usize {
        self.records.iter().filter(|tx| tx.user_name == user_name).count()
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn names(log: &TransactionLog, n: usize) -> Vec<&str> {
        log.recent(n).map(|tx| tx.user_name()).collect()
    }

    #[test]
    fn test_post_prepends() {
        let mut log = TransactionLog::new();
        log.post("amy", dec!(10)).unwrap();
        log.post("bob", dec!(5)).unwrap();
        log.post("cas", dec!(-2.5)).unwrap();

        assert_eq!(names(&log, 10), vec!["cas", "bob", "amy"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_append_after_reserve() {
        let mut log = TransactionLog::new();
        log.reserve_slot().unwrap();
        log.append(Transaction::new("amy".to_string(), dec!(2))).unwrap();

        assert_eq!(names(&log, 1), vec!["amy"]);
    }

    #[test]
    fn test_recent_limits_count() {
        let mut log = TransactionLog::new();
        for i in 0..5 {
            log.post("amy", Amount::from(i)).unwrap();
        }

        let amounts: Vec<Amount> = log.recent(2).map(|tx| tx.amount()).collect();
        assert_eq!(amounts, vec![dec!(4), dec!(3)]);
        assert_eq!(log.recent(0).count(), 0);
    }

    #[test]
    fn test_recent_on_empty_log() {
        let log = TransactionLog::new();
        assert_eq!(log.recent(3).count(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_purge_keeps_remaining_order() {
        let mut log = TransactionLog::new();
        log.post("amy", dec!(1)).unwrap();
        log.post("bob", dec!(2)).unwrap();
        log.post("amy", dec!(3)).unwrap();
        log.post("cas", dec!(4)).unwrap();
        log.post("amy", dec!(5)).unwrap();

        assert_eq!(log.purge("amy"), 3);
        assert_eq!(names(&log, 10), vec!["cas", "bob"]);
    }

    #[test]
    fn test_purge_is_idempotent() {
        let mut log = TransactionLog::new();
        log.post("amy", dec!(1)).unwrap();
        log.post("bob", dec!(2)).unwrap();

        assert_eq!(log.purge("amy"), 1);
        assert_eq!(log.purge("amy"), 0);
        assert_eq!(log.purge("nobody"), 0);
        assert_eq!(names(&log, 10), vec!["bob"]);
    }

    #[test]
    fn test_purge_single_record() {
        let mut log = TransactionLog::new();
        log.post("amy", dec!(1)).unwrap();

        log.purge("amy");
        assert!(log.is_empty());
    }

    #[test]
    fn test_count_for() {
        let mut log = TransactionLog::new();
        log.post("amy", dec!(1)).unwrap();
        log.post("bob", dec!(2)).unwrap();
        log.post("amy", dec!(3)).unwrap();

        assert_eq!(log.count_for("amy"), 2);
        assert_eq!(log.count_for("cas"), 0);
    }
}
