//! ifstate: network interface state inspection, reconciliation and monitoring
//!
//! A library for listing interfaces and addresses, moving an interface's
//! addresses to a declared state, and watching interface state for changes.

pub mod config;
pub mod monitor;
pub mod network;
pub mod reconcile;
pub mod time;
