//! Startup configuration for account state.
//!
//! Configuration is read once, from a JSON string or file, and only seeds the
//! initial state. Nothing is ever written back.

use crate::error::{AccountStateError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Initial account state.
///
/// Every key is optional:
///
/// ```json
/// { "initial_account": "alice", "known_accounts": ["alice", "bob"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Account selected at startup. Empty means none.
    pub initial_account: String,

    /// Account names to register at startup.
    pub known_accounts: Vec<String>,
}

impl StateConfig {
    /// Parse configuration from a JSON string.
    ///
    /// # Example
    ///
    /// ```
    /// use account_state::config::StateConfig;
    ///
    /// let config = StateConfig::from_json_str(r#"{"initial_account":"alice"}"#).unwrap();
    /// assert_eq!(config.initial_account, "alice");
    /// assert!(config.known_accounts.is_empty());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(AccountStateError::JsonError)
    }

    /// Read configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`AccountStateError::StorageError`] if the file cannot be read
    /// and [`AccountStateError::JsonError`] if it is not valid configuration.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(AccountStateError::StorageError)?;
        let config = Self::from_json_str(&contents)?;
        debug!(
            path = %path.display(),
            accounts = config.known_accounts.len(),
            "loaded account state config"
        );
        Ok(config)
    }
}
