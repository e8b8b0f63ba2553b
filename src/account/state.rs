//! Account state container.

use crate::account::registry::AccountRegistry;
use crate::config::StateConfig;
use crate::state::active::ActiveAccount;
use tracing::debug;

/// The active account and the list of known accounts, owned together.
///
/// Clones are handles to the same state, so one `AccountState` can be
/// created at startup and handed to every component that needs it.
#[derive(Debug, Clone, Default)]
pub struct AccountState {
    active: ActiveAccount,
    accounts: AccountRegistry,
}

impl AccountState {
    /// Create state with no active account and no known accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state seeded from configuration.
    ///
    /// The initial account is taken as given, whether or not it appears in
    /// `known_accounts`.
    ///
    /// # Example
    ///
    /// ```
    /// use account_state::account::state::AccountState;
    /// use account_state::config::StateConfig;
    ///
    /// let config = StateConfig {
    ///     initial_account: "alice".to_string(),
    ///     known_accounts: vec!["alice".to_string()],
    /// };
    /// let state = AccountState::from_config(&config);
    /// assert_eq!(state.active().get(), "alice");
    /// assert!(state.accounts().contains("alice"));
    /// ```
    pub fn from_config(config: &StateConfig) -> Self {
        debug!(
            initial = %config.initial_account,
            accounts = config.known_accounts.len(),
            "initializing account state"
        );
        Self {
            active: ActiveAccount::with_initial(config.initial_account.clone()),
            accounts: AccountRegistry::with_accounts(config.known_accounts.iter().cloned()),
        }
    }

    /// The active account cell.
    pub fn active(&self) -> &ActiveAccount {
        &self.active
    }

    /// The known account list.
    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let state = AccountState::new();
        assert_eq!(state.active().get(), "");
        assert!(state.accounts().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = StateConfig {
            initial_account: "bob".to_string(),
            known_accounts: vec!["bob".to_string(), "alice".to_string()],
        };

        let state = AccountState::from_config(&config);

        assert_eq!(state.active().get(), "bob");
        assert_eq!(state.accounts().list(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_clones_share_state() {
        let state = AccountState::new();
        let handle = state.clone();

        handle.active().set("carol");
        handle.accounts().add("carol").unwrap();

        assert_eq!(state.active().get(), "carol");
        assert!(state.accounts().contains("carol"));
    }

    #[test]
    fn test_active_is_independent_of_registry() {
        let state = AccountState::new();
        state.active().set("unregistered");
        assert!(!state.accounts().contains("unregistered"));
        assert_eq!(state.active().get(), "unregistered");
    }
}
