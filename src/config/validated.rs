//! Validated settings after merging CLI and TOML sources.
//!
//! Each command resolves only the settings it uses. All validation is
//! performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::cli::Cli;
use super::defaults;
use super::duration;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;
use crate::time::format_duration;

/// Loads the TOML settings file named by `--config`, if any.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_toml(cli: &Cli) -> Result<Option<TomlConfig>, ConfigError> {
    cli.config.as_deref().map(TomlConfig::load).transpose()
}

/// Validated settings of the `monitor` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Polling interval, always non-zero.
    pub interval: Duration,

    /// Interface to watch exclusively, if any.
    pub interface: Option<String>,
}

impl fmt::Display for MonitorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Monitor {{ interval: {}, interface: {} }}",
            format_duration(self.interval),
            self.interface.as_deref().unwrap_or("all"),
        )
    }
}

impl MonitorSettings {
    /// Resolves monitor settings from CLI values and optional TOML config.
    ///
    /// Priority: CLI explicit > TOML > default. An empty interface name
    /// means no filter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] if the TOML interval does
    /// not parse or the resolved interval is zero.
    pub fn resolve(
        interval: Option<Duration>,
        interface: Option<&str>,
        toml: Option<&TomlConfig>,
    ) -> Result<Self, ConfigError> {
        let toml_interval = toml
            .and_then(|t| t.monitor.interval.as_deref())
            .map(|raw| duration::parse(field::TOML_INTERVAL, raw))
            .transpose()?;

        let interval = interval
            .or(toml_interval)
            .unwrap_or_else(defaults::monitor_interval);

        if interval.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: field::INTERVAL,
                reason: "must be greater than 0".to_string(),
            });
        }

        let interface = interface
            .or_else(|| toml.and_then(|t| t.monitor.interface.as_deref()))
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.trim().to_string());

        Ok(Self {
            interval,
            interface,
        })
    }
}

/// Validated settings of the `apply-config` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplySettings {
    /// Path to the JSON desired-state file.
    pub file: PathBuf,

    /// Print the edit script instead of applying it.
    pub dry_run: bool,

    /// Inspect and prune both address families.
    pub prune_absent_families: bool,
}

impl fmt::Display for ApplySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Apply {{ file: {}, dry_run: {}, prune_absent_families: {} }}",
            self.file.display(),
            self.dry_run,
            self.prune_absent_families,
        )
    }
}

impl ApplySettings {
    /// Resolves apply settings from CLI values and optional TOML config.
    ///
    /// `prune_absent_families` uses OR semantics: enabled if either source
    /// enables it. Dry-run is CLI-only.
    #[must_use]
    pub fn resolve(
        file: &Path,
        dry_run: bool,
        prune_families: bool,
        toml: Option<&TomlConfig>,
    ) -> Self {
        Self {
            file: file.to_path_buf(),
            dry_run,
            prune_absent_families: prune_families
                || toml.is_some_and(|t| t.apply.prune_absent_families),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns [`ConfigError::FileWrite`] if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[path = "validated_tests.rs"]
mod tests;
