//! Observable state module.
//!
//! This module provides the reactive cell used for shared UI state and the
//! active account built on top of it.

pub mod active;
pub mod observable;
