//! JSON desired-state file loading.

use std::path::Path;

use crate::reconcile::DesiredState;

use super::error::{ConfigError, field};

/// Loads a desired-state file of the form
/// `{"interface": "eth0", "addresses": ["10.0.0.10/24"]}`.
///
/// Missing fields default to empty; the reconciler rejects them.
///
/// # Errors
///
/// Returns [`ConfigError::MissingRequired`] for an empty path,
/// [`ConfigError::FileRead`] if the file cannot be read, or
/// [`ConfigError::JsonParse`] if it is not valid JSON of that shape.
pub fn load_desired_state(path: &Path) -> Result<DesiredState, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::missing(
            field::DESIRED_STATE,
            "Pass the desired-state file with --file <path>.",
        ));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_desired_state(path, &content)
}

/// Parses desired-state JSON; `path` is only used in errors.
///
/// # Errors
///
/// Returns [`ConfigError::JsonParse`] if the content is invalid.
pub fn parse_desired_state(path: &Path, content: &str) -> Result<DesiredState, ConfigError> {
    serde_json::from_str(content).map_err(|source| ConfigError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}
