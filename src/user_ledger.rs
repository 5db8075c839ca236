//! Per-group users kept sorted by ascending balance
//!
//! Users live in a `Vec` ordered by `(balance, insertion rank)` with a
//! name-to-index map kept in step. A balance change moves the one affected
//! user toward the head or the tail past the neighbors it now violates
//! order with, and only the indices inside the moved span are rewritten.

use crate::error::{try_own, FatalError, LedgerError, UserError};
use crate::types::{Amount, Reposition, User};
use std::collections::HashMap;

/// Users of one group sorted by `(balance, insertion rank)`
#[derive(Debug, Clone, Default)]
pub struct UserLedger {
    /// Users in ascending order
    users: Vec<User>,
    /// Name to position in `users`
    index: HashMap<String, usize>,
    /// Insertion rank handed to the next new user
    next_seq: u64,
}

impl UserLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user with a zero balance at the end of the zero-balance run.
    /// Returns the position the user landed at.
    ///
    /// This is the only method here that allocates, so besides
    /// `UserError::Duplicate` it can fail with `FatalError::OutOfMemory`.
    /// Both are carried by `LedgerError`; every other method here returns
    /// `UserError` alone.
    pub fn add_user(&mut self, name: &str) -> Result<usize, LedgerError> {
        if self.index.contains_key(name) {
            return Err(UserError::Duplicate {
                name: name.to_string(),
            }
            .into());
        }

        self.users
            .try_reserve(1)
            .map_err(FatalError::out_of_memory("user record"))?;
        self.index
            .try_reserve(1)
            .map_err(FatalError::out_of_memory("user index entry"))?;
        let record_name = try_own(name, "user name")?;
        let index_name = try_own(name, "user name")?;

        let user = User::new(record_name, self.next_seq);
        self.next_seq += 1;

        let key = user.sort_key();
        let position = self.users.partition_point(|u| u.sort_key() < key);
        self.users.insert(position, user);
        self.index.insert(index_name, position);
        self.reindex(position + 1, self.users.len());

        Ok(position)
    }

    /// Look up a user by name
    pub fn find_user(&self, name: &str) -> Result<&User, UserError> {
        self.position_of(name)
            .map(|i| &self.users[i])
            .ok_or_else(|| UserError::NotFound {
                name: name.to_string(),
            })
    }

    /// Remove a user and return its record.
    ///
    /// Only the ledger is touched here; purging the user's transactions is
    /// done by the owning [`Group`](crate::group::Group).
    pub fn remove_user(&mut self, name: &str) -> Result<User, UserError> {
        let position = self.index.remove(name).ok_or_else(|| UserError::NotFound {
            name: name.to_string(),
        })?;
        let removed = self.users.remove(position);
        self.reindex(position, self.users.len());
        Ok(removed)
    }

    /// Users in ascending-balance order
    pub fn list_users(&self) -> impl Iterator<Item = &User> + '_ {
        self.users.iter()
    }

    /// Current balance of a user
    pub fn balance_of(&self, name: &str) -> Result<Amount, UserError> {
        self.find_user(name).map(User::balance)
    }

    /// Every user sharing the minimum balance, in ledger order.
    ///
    /// Reads from the head only as long as balances equal the first entry's.
    pub fn least_paid(&self) -> Result<impl Iterator<Item = &User> + '_, UserError> {
        let lowest = self.users.first().ok_or(UserError::EmptyLedger)?.balance;
        Ok(self.users.iter().take_while(move |u| u.balance == lowest))
    }

    /// Add `amount` to a user's balance and move that user to restore ordering.
    ///
    /// On failure neither the balance nor the order changes.
    pub fn apply_transaction(&mut self, name: &str, amount: Amount) -> Result<Reposition, UserError> {
        let from = self.position_of(name).ok_or_else(|| UserError::NotFound {
            name: name.to_string(),
        })?;
        let balance = self.users[from]
            .balance
            .checked_add(amount)
            .ok_or_else(|| UserError::BalanceOverflow {
                name: name.to_string(),
            })?;
        self.users[from].balance = balance;

        let key = self.users[from].sort_key();
        let mut to = from;
        while to + 1 < self.users.len() && self.users[to + 1].sort_key() < key {
            to += 1;
        }
        while to > 0 && self.users[to - 1].sort_key() > key {
            to -= 1;
        }

        if to > from {
            self.users[from..=to].rotate_left(1);
            self.reindex(from, to + 1);
        } else if to < from {
            self.users[to..=from].rotate_right(1);
            self.reindex(to, from + 1);
        }

        Ok(Reposition { from, to })
    }

    /// Position of a user in the ledger
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether a user with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Sum of all balances
    pub fn total_balance(&self) -> Amount {
        self.users.iter().map(User::balance).sum()
    }

    /// Get the number of users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if the ledger has no users
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Ordering and index agree with each other
    pub fn is_consistent(&self) -> bool {
        let sorted = self
            .users
            .windows(2)
            .all(|pair| pair[0].sort_key() < pair[1].sort_key());
        let indexed = self.index.len() == self.users.len()
            && self
                .users
                .iter()
                .enumerate()
                .all(|(i, u)| self.index.get(&u.name) == Some(&i));
        sorted && indexed
    }

    fn reindex(&mut self, start: usize, end: usize) {
        for (i, user) in self.users[start..end].iter().enumerate() {
            if let Some(slot) = self.index.get_mut(&user.name) {
                *slot = start + i;
            }
        }
    }
}
