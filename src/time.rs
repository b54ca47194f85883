//! Clock injection, timestamp and duration rendering.
//!
//! The watcher stamps every notification batch with the time from a
//! [`Clock`]; tests substitute a fixed one.

use std::time::{Duration, SystemTime};

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of wall-clock time.
///
/// ```
/// use ifstate::time::{Clock, SystemClock};
///
/// assert!(SystemClock.now() >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// The host's real-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Formats a point in time as RFC 3339 in UTC with second precision.
///
/// ```
/// use std::time::{Duration, SystemTime};
/// use ifstate::time::rfc3339;
///
/// let t = SystemTime::UNIX_EPOCH + Duration::from_secs(1_704_067_200);
/// assert_eq!(rfc3339(t), "2024-01-01T00:00:00Z");
/// ```
#[must_use]
pub fn rfc3339(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Renders a duration as hours, minutes and seconds, e.g. `1m30s`.
///
/// Leading zero components are omitted, inner ones are kept (`1h0m5s`).
/// Durations under a second use the largest unit of `ms`, `µs` or `ns`.
///
/// ```
/// use std::time::Duration;
/// use ifstate::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
/// assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
/// ```
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let nanos = d.subsec_nanos();
    if d.as_secs() == 0 {
        return match nanos {
            0 => "0s".to_string(),
            1_000_000.. => {
                let ms = u64::from(nanos / 1_000_000);
                format!("{}ms", decimal(ms, nanos % 1_000_000, 6))
            }
            1_000.. => format!("{}µs", decimal(u64::from(nanos / 1_000), nanos % 1_000, 3)),
            _ => format!("{nanos}ns"),
        };
    }

    let total = d.as_secs();
    let (hours, minutes) = (total / 3600, total / 60 % 60);
    let seconds = decimal(total % 60, nanos, 9);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// `whole.frac` with `frac` zero-padded to `width` digits and trailing
/// zeros dropped.
fn decimal(whole: u64, frac: u32, width: usize) -> String {
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
