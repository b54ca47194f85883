//! Process-level glue for `main`: exit statuses, log setup and hints.

use std::io;
use std::path::Path;

use ifstate::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Process exit statuses.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0), including a monitor stopped by a signal.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Exit code 1: the user's input was rejected before the host was touched.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Exit code 2: the host refused or failed an operation.
    ///
    /// `ExitCode::from` is not `const`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

const INIT_HINT: &str = "Run 'ifstate init' to generate a configuration template.";
const DESIRED_STATE_HINT: &str = "A desired-state file looks like: \
     {\"interface\": \"eth0\", \"addresses\": [\"10.0.0.10/24\"]}";

/// Picks the suggestion for a configuration error, if one applies.
///
/// `settings_file` is the `--config` path; a read failure on any other
/// path concerns the desired-state file.
fn config_hint(error: &ConfigError, settings_file: Option<&Path>) -> Option<&'static str> {
    match error {
        ConfigError::TomlParse(_) => Some(INIT_HINT),
        ConfigError::FileRead { path, .. } if settings_file == Some(path.as_path()) => {
            Some(INIT_HINT)
        }
        ConfigError::FileRead { .. } | ConfigError::JsonParse { .. } => Some(DESIRED_STATE_HINT),
        ConfigError::MissingRequired { field: f, .. } if *f == field::DESIRED_STATE => {
            Some(DESIRED_STATE_HINT)
        }
        _ => None,
    }
}

/// Follows a configuration error with a suggestion on stderr, when one applies.
pub fn print_config_hint(error: &ConfigError, settings_file: Option<&Path>) {
    if let Some(hint) = config_hint(error, settings_file) {
        eprintln!("\n{hint}");
    }
}

/// Installs the global `tracing` subscriber on stderr.
///
/// `RUST_LOG` overrides the level chosen by `--verbose`.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
