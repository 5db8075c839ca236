//! A named group owning one user ledger and one transaction log

use crate::error::{FatalError, LedgerError, UserError};
use crate::transaction_log::TransactionLog;
use crate::types::{Amount, Reposition, Transaction, User};
use crate::user_ledger::UserLedger;

/// Outcome of removing a user from a group
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    /// The removed user with its final balance
    pub user: User,
    /// Number of transactions dropped from the group's log
    pub purged: usize,
}

/// Named group with its own users and transaction history
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    users: UserLedger,
    transactions: TransactionLog,
}

impl Group {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            users: UserLedger::new(),
            transactions: TransactionLog::new(),
        }
    }

    /// Name, unique within the directory
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Users sorted by ascending balance
    pub fn users(&self) -> &UserLedger {
        &self.users
    }

    /// Transactions, newest first
    pub fn transactions(&self) -> &TransactionLog {
        &self.transactions
    }

    /// Add a user with a zero balance
    pub fn add_user(&mut self, user_name: &str) -> Result<usize, LedgerError> {
        self.users.add_user(user_name)
    }

    /// Remove a user together with all of its transactions
    pub fn remove_user(&mut self, user_name: &str) -> Result<Removal, LedgerError> {
        let user = self.users.remove_user(user_name)?;
        let purged = self.transactions.purge(&user.name);
        Ok(Removal { user, purged })
    }

    /// Apply `amount` to a user's balance and record it in the log.
    ///
    /// The record is built and log space reserved before the balance moves,
    /// so an allocation failure leaves the group untouched. An append that
    /// still fails afterwards is reported as an inconsistency.
    pub fn post_transaction(&mut self, user_name: &str, amount: Amount) -> Result<Reposition, LedgerError> {
        if !self.users.contains(user_name) {
            return Err(UserError::NotFound {
                name: user_name.to_string(),
            }
            .into());
        }
        let record = Transaction::try_new(user_name, amount)?;
        self.transactions.reserve_slot()?;
        let reposition = self.users.apply_transaction(user_name, amount)?;
        self.transactions
            .append(record)
            .map_err(|_| FatalError::Inconsistent {
                reason: "balance updated but log append failed",
            })?;
        Ok(reposition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn dorm() -> Group {
        let mut group = Group::new("dorm".to_string());
        for name in ["amy", "bob", "cas"] {
            group.add_user(name).unwrap();
        }
        group
    }

    #[test]
    fn test_post_updates_ledger_and_log() {
        let mut group = dorm();
        group.post_transaction("amy", dec!(10)).unwrap();

        assert_eq!(group.users().balance_of("amy").unwrap(), dec!(10));
        let recent: Vec<String> = group.transactions().recent(5).map(|t| t.to_string()).collect();
        assert_eq!(recent, vec!["amy 10.00"]);
    }

    #[test]
    fn test_post_to_missing_user_changes_nothing() {
        let mut group = dorm();
        let err = group.post_transaction("zed", dec!(3)).unwrap_err();

        assert_eq!(
            err,
            LedgerError::User(UserError::NotFound {
                name: "zed".to_string()
            })
        );
        assert!(group.transactions().is_empty());
    }

    #[test]
    fn test_remove_user_purges_transactions() {
        let mut group = dorm();
        group.post_transaction("bob", dec!(4)).unwrap();
        group.post_transaction("amy", dec!(1)).unwrap();
        group.post_transaction("bob", dec!(2)).unwrap();

        let removal = group.remove_user("bob").unwrap();
        assert_eq!(removal.purged, 2);
        assert_eq!(removal.user.balance, dec!(6));
        assert_eq!(group.transactions().count_for("bob"), 0);
        assert_eq!(group.transactions().len(), 1);
    }

    #[test]
    fn test_remove_missing_user_keeps_log() {
        let mut group = dorm();
        group.post_transaction("amy", dec!(1)).unwrap();

        assert!(group.remove_user("zed").is_err());
        assert_eq!(group.transactions().len(), 1);
    }
}
