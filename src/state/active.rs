//! The currently selected account.

use crate::state::observable::{Observable, Subscription};
use tracing::debug;

/// Observable identifier of the active account.
///
/// Starts out as the empty string, meaning no account is selected. Any text
/// is accepted on write; nothing checks that the account exists.
#[derive(Debug, Clone, Default)]
pub struct ActiveAccount {
    cell: Observable<String>,
}

impl ActiveAccount {
    /// Create a cell with no account selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell with `id` already selected.
    pub fn with_initial(id: impl Into<String>) -> Self {
        Self {
            cell: Observable::new(id.into()),
        }
    }

    /// The active account identifier, or `""` when none is selected.
    pub fn get(&self) -> String {
        self.cell.get()
    }

    /// Replace the active account and notify subscribers.
    pub fn set(&self, id: impl Into<String>) {
        let id = id.into();
        debug!(account = %id, "active account changed");
        self.cell.set(id);
    }

    /// Deselect the active account.
    pub fn clear(&self) {
        self.set(String::new());
    }

    /// Whether an account is currently selected.
    pub fn is_selected(&self) -> bool {
        self.cell.with(|id| !id.is_empty())
    }

    /// Observe the active account. `callback` runs immediately with the
    /// current value and again after every write.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.cell.subscribe(callback)
    }

    /// The underlying cell.
    pub fn as_observable(&self) -> &Observable<String> {
        &self.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_initial_value_is_empty() {
        let active = ActiveAccount::new();
        assert_eq!(active.get(), "");
        assert!(!active.is_selected());
    }

    #[test]
    fn test_write_then_read() {
        let active = ActiveAccount::new();
        active.set("0xABC123");
        assert_eq!(active.get(), "0xABC123");
        assert!(active.is_selected());
    }

    #[test]
    fn test_subscriber_receives_write() {
        let active = ActiveAccount::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = active.subscribe(move |id| sink.lock().push(id.clone()));

        active.set("0xABC123");

        assert_eq!(*seen.lock(), vec!["".to_string(), "0xABC123".to_string()]);
    }

    #[test]
    fn test_empty_write_is_accepted() {
        let active = ActiveAccount::with_initial("alice");
        active.set("");
        assert_eq!(active.get(), "");
    }

    #[test]
    fn test_clear_deselects() {
        let active = ActiveAccount::with_initial("alice");
        assert!(active.is_selected());

        active.clear();

        assert!(!active.is_selected());
    }

    #[test]
    fn test_clones_share_selection() {
        let active = ActiveAccount::new();
        let handle = active.clone();
        handle.set("bob");
        assert_eq!(active.get(), "bob");
        assert_eq!(active.as_observable().get(), "bob");
    }
}
