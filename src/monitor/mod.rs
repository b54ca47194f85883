//! Monitor layer for detecting interface and address changes.
//!
//! This module provides types and functions for:
//! - Capturing host state ([`Snapshot`])
//! - Detecting changes between snapshots ([`diff_interfaces`], [`diff_addresses`])
//! - Rendering notification lines ([`report`])
//! - Polling-based monitoring ([`Watcher`])

mod change;
mod error;
pub mod report;
mod snapshot;
mod watcher;

pub use change::{
    AddressChange, InterfaceDiff, InterfaceUpdate, NO_VISIBLE_DIFFERENCE, describe_update,
    diff_addresses, diff_interfaces,
};
pub use error::WatchError;
pub use snapshot::Snapshot;
pub use watcher::Watcher;
