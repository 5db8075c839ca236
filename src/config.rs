//! Ledger configuration

use crate::error::ConfigError;
use crate::journal::LogLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Lowest level written to the journal
    pub journal_level: LogLevel,
    /// Maximum number of journal entries kept, unbounded when `None`
    pub journal_capacity: Option<usize>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            journal_level: LogLevel::Info,
            journal_capacity: None,
        }
    }
}

impl LedgerConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid {
            reason: format!("JSON parsing failed: {}", e),
        })
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Invalid {
            reason: format!("JSON encoding failed: {}", e),
        })
    }
}
