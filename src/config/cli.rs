//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use super::defaults;
use super::duration::parse_interval_arg;

/// ifstate: interface state inspection, reconciliation and monitoring
///
/// Lists interfaces and addresses, applies a declared address set to an
/// interface, and reports interface changes over time.
#[derive(Debug, Parser)]
#[command(name = "ifstate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to TOML settings file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for ifstate
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List network interfaces
    Interfaces,

    /// List the addresses of one interface
    Addresses {
        /// Interface name
        #[arg(long, short)]
        interface: String,
    },

    /// Reconcile an interface against a JSON desired-state file
    ApplyConfig {
        /// Path to the desired-state file
        #[arg(long, short)]
        file: PathBuf,

        /// Print the edit script without changing anything
        #[arg(long)]
        dry_run: bool,

        /// Also remove addresses of families absent from the file
        #[arg(long = "prune-families")]
        prune_families: bool,
    },

    /// Watch interfaces and print changes until interrupted
    Monitor {
        /// Polling interval (e.g. 500ms, 5s, 1m; bare numbers are seconds)
        #[arg(long, short = 't', value_parser = parse_interval_arg)]
        interval: Option<Duration>,

        /// Only watch this interface
        #[arg(long, short)]
        interface: Option<String>,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_PATH)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
