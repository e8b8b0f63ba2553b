//! Account data module.
//!
//! This module provides the keystore record shape, the registry of known
//! account names, and the container that owns account state.

pub mod keystore;
pub mod registry;
pub mod state;
