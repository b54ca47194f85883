//! Reconcile layer for moving live addresses to a declared state.
//!
//! This module provides types and traits for:
//! - Declaring the target state ([`DesiredState`], [`DesiredAddressSet`])
//! - Computing minimal edits ([`EditScript`])
//! - Mutating the host ([`NetlinkProvider`], [`platform`])
//! - Running a reconciliation pass ([`Reconciler`])

mod desired;
mod edit;
mod error;
mod executor;
pub mod platform;
mod provider;

pub use desired::{DesiredAddressSet, DesiredState};
pub use edit::EditScript;
pub use error::ReconcileError;
pub use executor::Reconciler;
pub use provider::{NetlinkError, NetlinkProvider};
