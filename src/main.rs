//! ifstate: network interface state tool
//!
//! Entry point for the ifstate application.

use ifstate::config::{Cli, load_toml};
use std::path::Path;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use run::RunError;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);
    let settings_file = cli.config.clone();

    // `init` must work even when the referenced settings file is broken
    let toml = if cli.is_init() {
        None
    } else {
        match load_toml(&cli) {
            Ok(toml) => toml,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                print_config_hint(&e, settings_file.as_deref());
                return exit_code::CONFIG_ERROR;
            }
        }
    };

    match run::execute(cli.command, toml.as_ref()) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => report_error(&e, settings_file.as_deref()),
    }
}

/// Prints an error and maps it to an exit code.
fn report_error(error: &RunError, settings_file: Option<&Path>) -> ExitCode {
    if error.is_config() {
        eprintln!("Configuration error: {error}");
        if let RunError::Config(e) = error {
            print_config_hint(e, settings_file);
        }
        return exit_code::CONFIG_ERROR;
    }

    tracing::error!("{error}");
    exit_code::runtime_error()
}
