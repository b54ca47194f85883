//! Command-line parsing, the optional `ifstate.toml` settings file and the
//! JSON desired-state document.
//!
//! A setting given on the command line wins over the settings file, which
//! wins over [`defaults`]. [`MonitorSettings`] and [`ApplySettings`] hold the
//! merged result for each command.
//!
//! `--prune-families` is OR-ed with `apply.prune_absent_families`, so the
//! flag can enable pruning but never disable it. `--dry-run` exists only on
//! the command line.

mod cli;
pub mod defaults;
mod desired;
pub mod duration;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command};
pub use desired::{load_desired_state, parse_desired_state};
pub use error::{ConfigError, field};
pub use toml::{ApplySection, MonitorSection, TomlConfig, default_config_template};
pub use validated::{ApplySettings, MonitorSettings, load_toml, write_default_config};
