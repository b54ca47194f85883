//! Human-friendly duration parsing for CLI and TOML values.

use std::time::Duration;

use super::{ConfigError, field};

/// Parses `500ms`, `5s`, `2m`, `1h`, or a bare number of seconds.
///
/// `field` names the setting in the returned error.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDuration`] if the number or unit is invalid.
pub fn parse(field: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let text = raw.trim();
    let invalid = |reason: String| ConfigError::InvalidDuration { field, reason };

    let (digits, unit): (&str, fn(u64) -> Option<Duration>) =
        if let Some(ms) = text.strip_suffix("ms") {
            (ms, |v| Some(Duration::from_millis(v)))
        } else if let Some(s) = text.strip_suffix('s') {
            (s, |v| Some(Duration::from_secs(v)))
        } else if let Some(m) = text.strip_suffix('m') {
            (m, |v| v.checked_mul(60).map(Duration::from_secs))
        } else if let Some(h) = text.strip_suffix('h') {
            (h, |v| v.checked_mul(3600).map(Duration::from_secs))
        } else {
            (text, |v| Some(Duration::from_secs(v)))
        };

    let value: u64 = digits
        .trim()
        .parse()
        .map_err(|e| invalid(format!("'{raw}' is not a duration ({e})")))?;

    unit(value).ok_or_else(|| invalid(format!("'{raw}' is too large")))
}

/// clap value parser for the `--interval` flag.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDuration`] for unparsable input.
pub fn parse_interval_arg(raw: &str) -> Result<Duration, ConfigError> {
    parse(field::INTERVAL, raw)
}
