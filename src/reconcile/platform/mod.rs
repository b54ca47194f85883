//! Platform-specific netlink provider implementations.
//!
//! # Platform Support
//!
//! - **Linux**: `rtnetlink` over a private current-thread runtime.
//! - Other platforms have no live provider.

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::{LinkHandle, RtnetlinkProvider};
