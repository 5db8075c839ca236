//! Core data types for the ledger

use crate::error::{try_own, FatalError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed monetary amount. Stored at full precision, displayed with two decimals.
pub type Amount = Decimal;

/// Number of fractional digits used when rendering amounts.
pub const DISPLAY_SCALE: u32 = 2;

/// Render an amount with exactly two fractional digits.
pub fn format_amount(amount: Amount) -> String {
    let rounded = amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// A participant in a group with a running balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Name, unique within the owning group
    pub name: String,
    /// Sum of every amount posted for this user
    pub balance: Amount,
    /// Insertion rank within the owning ledger, breaks balance ties
    #[serde(skip)]
    pub(crate) seq: u64,
}

impl User {
    pub(crate) fn new(name: String, seq: u64) -> Self {
        Self {
            name,
            balance: Decimal::ZERO,
            seq,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Sort key: ascending balance, then insertion order
    pub(crate) fn sort_key(&self) -> (Amount, u64) {
        (self.balance, self.seq)
    }
}

/// Immutable record of one balance-changing event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Copy of the user's name, not a reference into the ledger
    pub user_name: String,
    /// Signed amount applied to the balance when posted
    pub amount: Amount,
}

impl Transaction {
    /// Create a record from an owned name
    pub fn new(user_name: String, amount: Amount) -> Self {
        Self { user_name, amount }
    }

    /// Build a record from a borrowed name, surfacing allocation failure
    pub fn try_new(user_name: &str, amount: Amount) -> Result<Self, FatalError> {
        Ok(Self::new(try_own(user_name, "transaction user name")?, amount))
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.user_name, format_amount(self.amount))
    }
}

/// Movement of a user inside its ledger after a balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reposition {
    pub from: usize,
    pub to: usize,
}

impl Reposition {
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}
