//! Platform-specific interface and address provider implementations.
//!
//! # Platform Support
//!
//! - **Linux**: `getifaddrs(3)` via the `nix` crate, MTU from sysfs.
//! - Other platforms have no live provider.

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::SystemProvider;

#[cfg(target_os = "linux")]
pub use linux::SystemProvider as PlatformProvider;
