//! Registry of known account names.
//!
//! The registry keeps the names of the accounts available to the user,
//! sorted and free of duplicates, in an observable list so views can follow
//! additions and removals. It is independent of the active account.

use crate::error::{AccountStateError, Result};
use crate::state::observable::{Observable, Subscription};
use std::collections::BTreeSet;
use tracing::debug;

/// Observable, sorted list of account names.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Observable<Vec<String>>,
}

impl AccountRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `names`. Empty names are dropped and
    /// duplicates collapse.
    pub fn with_accounts<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accounts: Observable::new(normalize(names)),
        }
    }

    /// Register a new account name.
    ///
    /// # Errors
    ///
    /// Returns [`AccountStateError::InvalidAccountError`] for an empty name
    /// and [`AccountStateError::AlreadyExistsError`] if it is already known.
    ///
    /// # Example
    ///
    /// ```
    /// use account_state::account::registry::AccountRegistry;
    ///
    /// let registry = AccountRegistry::new();
    /// registry.add("alice").unwrap();
    /// assert!(registry.add("alice").is_err());
    /// ```
    pub fn add(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(AccountStateError::InvalidAccountError(
                "Account name must not be empty".to_string(),
            ));
        }

        self.accounts.try_update(|current| {
            match current.binary_search(&name) {
                Ok(_) => Err(AccountStateError::AlreadyExistsError(format!(
                    "Account '{}' already exists",
                    name
                ))),
                Err(pos) => {
                    let mut next = current.clone();
                    next.insert(pos, name.clone());
                    Ok(next)
                }
            }
        })?;

        debug!(account = %name, "account registered");
        Ok(())
    }

    /// Forget an account name.
    ///
    /// # Errors
    ///
    /// Returns [`AccountStateError::NotFoundError`] if the name is unknown.
    pub fn remove(&self, name: &str) -> Result<()> {
        self.accounts.try_update(|current| {
            let mut next = current.clone();
            next.retain(|known| known != name);
            if next.len() == current.len() {
                return Err(AccountStateError::NotFoundError(format!(
                    "Account '{}' not found",
                    name
                )));
            }
            Ok(next)
        })?;

        debug!(account = %name, "account removed");
        Ok(())
    }

    /// Replace the whole list at once, notifying subscribers a single time.
    pub fn replace_all<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = normalize(names);
        debug!(count = names.len(), "account list refreshed");
        self.accounts.set(names);
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.accounts
            .with(|names| names.binary_search_by(|known| known.as_str().cmp(name)).is_ok())
    }

    /// All registered names, sorted.
    pub fn list(&self) -> Vec<String> {
        self.accounts.get()
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.accounts.with(Vec::len)
    }

    /// Whether no names are registered.
    pub fn is_empty(&self) -> bool {
        self.accounts.with(Vec::is_empty)
    }

    /// Observe the list. `callback` runs immediately and after every change.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Vec<String>) + Send + Sync + 'static,
    {
        self.accounts.subscribe(callback)
    }
}

fn normalize<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(Into::into)
        .filter(|name: &String| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = AccountRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_add_keeps_sorted() {
        let registry = AccountRegistry::new();
        registry.add("carol").unwrap();
        registry.add("alice").unwrap();
        registry.add("bob").unwrap();

        assert_eq!(registry.list(), vec!["alice", "bob", "carol"]);
        assert!(registry.contains("bob"));
        assert!(!registry.contains("dave"));
    }

    #[test]
    fn test_add_duplicate() {
        let registry = AccountRegistry::new();
        registry.add("alice").unwrap();

        let result = registry.add("alice");

        match result {
            Err(AccountStateError::AlreadyExistsError(_)) => {}
            _ => panic!("Expected AlreadyExistsError"),
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_empty_name() {
        let registry = AccountRegistry::new();
        match registry.add("") {
            Err(AccountStateError::InvalidAccountError(_)) => {}
            _ => panic!("Expected InvalidAccountError"),
        }
    }

    #[test]
    fn test_remove_success() {
        let registry = AccountRegistry::with_accounts(["alice", "bob"]);
        registry.remove("alice").unwrap();
        assert_eq!(registry.list(), vec!["bob"]);
    }

    #[test]
    fn test_remove_not_found() {
        let registry = AccountRegistry::new();
        match registry.remove("ghost") {
            Err(AccountStateError::NotFoundError(_)) => {}
            _ => panic!("Expected NotFoundError"),
        }
    }

    #[test]
    fn test_with_accounts_normalizes() {
        let registry = AccountRegistry::with_accounts(vec!["b", "", "a", "b"]);
        assert_eq!(registry.list(), vec!["a", "b"]);
    }

    #[test]
    fn test_replace_all_notifies_once() {
        let registry = AccountRegistry::with_accounts(["old"]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = registry.subscribe(move |names| sink.lock().push(names.clone()));

        registry.replace_all(["y", "x"]);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_rejected_edit_does_not_notify() {
        let registry = AccountRegistry::with_accounts(["alice"]);
        let count = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&count);
        let _sub = registry.subscribe(move |_| *counter.lock() += 1);

        assert!(registry.add("alice").is_err());
        assert!(registry.remove("bob").is_err());

        assert_eq!(*count.lock(), 1);
    }
}
