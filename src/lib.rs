//! account-state: shared account state for wallet front ends
//!
//! This library provides the state a wallet UI shares between its views:
//!
//! - An observable active-account identifier, empty until an account is chosen
//! - A registry of known account names
//! - The `Keystore` record shape (public key, signature, message)
//!
//! # Architecture
//!
//! State lives in explicitly owned [`Observable`](state::observable::Observable)
//! cells rather than globals. Handles are cheap to clone and share one cell;
//! every write is delivered to every subscriber, in order. Reads, writes and
//! subscriptions never fail. Errors only come from decoding records, editing
//! the registry, and loading configuration.
//!
//! # Example
//!
//! ```rust
//! use account_state::account::state::AccountState;
//! use std::sync::{Arc, Mutex};
//!
//! let state = AccountState::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let _sub = state.active().subscribe(move |id| sink.lock().unwrap().push(id.clone()));
//!
//! state.active().set("0xABC123");
//!
//! assert_eq!(state.active().get(), "0xABC123");
//! assert_eq!(*seen.lock().unwrap(), vec!["", "0xABC123"]);
//! ```

pub mod account;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use account::keystore::{FieldValue, JsonValue, Keystore};
pub use account::registry::AccountRegistry;
pub use account::state::AccountState;
pub use config::StateConfig;
pub use error::{AccountStateError, Result};
pub use state::active::ActiveAccount;
pub use state::observable::{Observable, SubscriberId, Subscription};
