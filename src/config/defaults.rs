//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default monitor polling interval in seconds.
pub const MONITOR_INTERVAL_SECS: u64 = 5;

/// Default output path of the `init` template.
pub const CONFIG_PATH: &str = "ifstate.toml";

/// Default monitor polling interval as Duration.
#[must_use]
pub const fn monitor_interval() -> Duration {
    Duration::from_secs(MONITOR_INTERVAL_SECS)
}
