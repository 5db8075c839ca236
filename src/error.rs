//! Error types for the ledger

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Group error: {0}")]
    Group(#[from] GroupError),

    #[error("User error: {0}")]
    User(#[from] UserError),

    #[error("Fatal error: {0}")]
    Fatal(#[from] FatalError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("Group already exists: {name}")]
    Duplicate { name: String },

    #[error("Group not found: {name}")]
    NotFound { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("User already exists: {name}")]
    Duplicate { name: String },

    #[error("User not found: {name}")]
    NotFound { name: String },

    #[error("Group has no users")]
    EmptyLedger,

    #[error("Balance of {name} would overflow")]
    BalanceOverflow { name: String },
}

/// Failures with no recovery path. Callers should stop using the ledger.
///
/// Both variants carry only static text so that building one never allocates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    /// A record or name could not be allocated
    #[error("Out of memory while allocating {what}")]
    OutOfMemory { what: &'static str },

    /// A compound operation stopped halfway
    #[error("Internal consistency violated: {reason}")]
    Inconsistent { reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// Flat discriminant over every error a ledger operation can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DuplicateGroup,
    DuplicateUser,
    NotFound,
    EmptyLedger,
    Overflow,
    OutOfMemory,
    Inconsistent,
    InvalidConfig,
}

impl LedgerError {
    /// Kind of this error, with group and user context folded away
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Group(GroupError::Duplicate { .. }) => ErrorKind::DuplicateGroup,
            LedgerError::Group(GroupError::NotFound { .. }) => ErrorKind::NotFound,
            LedgerError::User(UserError::Duplicate { .. }) => ErrorKind::DuplicateUser,
            LedgerError::User(UserError::NotFound { .. }) => ErrorKind::NotFound,
            LedgerError::User(UserError::EmptyLedger) => ErrorKind::EmptyLedger,
            LedgerError::User(UserError::BalanceOverflow { .. }) => ErrorKind::Overflow,
            LedgerError::Fatal(FatalError::OutOfMemory { .. }) => ErrorKind::OutOfMemory,
            LedgerError::Fatal(FatalError::Inconsistent { .. }) => ErrorKind::Inconsistent,
            LedgerError::Config(_) => ErrorKind::InvalidConfig,
        }
    }

    /// True for errors that leave no way to continue safely.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LedgerError::Fatal(_))
    }
}

impl FatalError {
    pub(crate) fn out_of_memory(what: &'static str) -> impl FnOnce(TryReserveError) -> FatalError {
        move |_| FatalError::OutOfMemory { what }
    }
}

/// Copy a borrowed name into an owned string, surfacing allocation failure.
pub(crate) fn try_own(name: &str, what: &'static str) -> Result<String, FatalError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(name.len())
        .map_err(FatalError::out_of_memory(what))?;
    owned.push_str(name);
    Ok(owned)
}
