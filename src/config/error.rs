//! Failures raised while loading settings and input files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong before a command touches the host.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A settings or desired-state file could not be opened.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The desired-state document is not valid JSON for [`DesiredState`].
    ///
    /// [`DesiredState`]: crate::reconcile::DesiredState
    #[error("Failed to parse desired state '{}': {source}", path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `init` could not create the template.
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A value neither the command line nor the settings file supplied.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        field: &'static str,
        /// One sentence telling the user where to put the value.
        hint: &'static str,
    },

    /// A zero or unparsable duration.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration { field: &'static str, reason: String },
}

/// Names used in [`ConfigError`] messages.
pub mod field {
    pub const DESIRED_STATE: &str = "file";
    pub const INTERVAL: &str = "interval";
    pub const TOML_INTERVAL: &str = "monitor.interval";
}

impl ConfigError {
    /// Shorthand for [`ConfigError::MissingRequired`].
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn file_read_displays_path() {
        let error = ConfigError::FileRead {
            path: PathBuf::from("/etc/ifstate.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        assert_eq!(
            error.to_string(),
            "Failed to read config file '/etc/ifstate.toml': no such file"
        );
    }

    #[test]
    fn json_parse_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ConfigError::JsonParse {
            path: PathBuf::from("desired.json"),
            source,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("desired.json"));
    }

    #[test]
    fn missing_builds_required_error() {
        let error = ConfigError::missing(field::DESIRED_STATE, "Pass --file <path>.");
        assert_eq!(
            error.to_string(),
            "Missing required field: file. Pass --file <path>."
        );
    }
}
