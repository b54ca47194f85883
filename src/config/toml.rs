//! Settings file schema.
//!
//! Every key is optional; absent keys fall back to CLI values or built-in
//! defaults during resolution.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Contents of `ifstate.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub monitor: MonitorSection,

    #[serde(default)]
    pub apply: ApplySection,
}

/// `[monitor]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Poll period such as `"5s"` or `"250ms"`.
    pub interval: Option<String>,

    /// Restrict the watcher to one interface name.
    pub interface: Option<String>,
}

/// `[apply]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplySection {
    /// Inspect both address families even when the desired state names one.
    #[serde(default)]
    pub prune_absent_families: bool,
}

impl TomlConfig {
    /// Reads and parses the settings file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileRead`] when the file is unreadable, otherwise any
    /// error from [`TomlConfig::parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(source) => Err(ConfigError::FileRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TomlParse`] when the text is malformed or names a key
    /// outside the schema.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Commented settings file written by `ifstate init`.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ifstate configuration file
# Explicit command-line flags take precedence over these values.

[monitor]
# Polling interval (default: 5s). Accepts ms, s, m, h suffixes.
interval = "5s"

# Only watch this interface (default: all interfaces)
# interface = "eth0"

[apply]
# Also remove addresses of families that the desired-state file omits.
# By default an IPv4-only file leaves IPv6 addresses untouched.
prune_absent_families = false
"#
    .to_string()
}
