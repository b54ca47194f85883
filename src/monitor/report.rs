//! Human-readable notification lines.
//!
//! Every event line has the shape `[<timestamp>] <subject> <action>[: <details>]`.

use std::io::{self, Write};
use std::time::Duration;

use super::Snapshot;
use super::change::{AddressChange, InterfaceDiff};
use crate::time::format_duration;

/// Writes the startup report for the first snapshot.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_initial<W: Write>(
    out: &mut W,
    timestamp: &str,
    interval: Duration,
    filter: Option<&str>,
    snapshot: &Snapshot,
) -> io::Result<()> {
    writeln!(
        out,
        "[{timestamp}] monitoring started (interval {})",
        format_duration(interval)
    )?;
    if let Some(name) = filter {
        writeln!(out, " - filter: {name}")?;
    }

    if snapshot.is_empty() {
        return match filter {
            None => writeln!(out, "No interfaces detected yet"),
            Some(name) => writeln!(out, "Waiting for {name} to appear..."),
        };
    }

    for (name, iface) in snapshot.interfaces() {
        writeln!(out, " - {name} (MTU={}, HW={})", iface.mtu, iface.hardware_addr)?;
        let addrs = snapshot.addresses_of(name).cloned().unwrap_or_default();
        writeln!(out, "   addresses: {addrs}")?;
    }
    Ok(())
}

/// Writes one line per interface event and per non-empty address delta.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_changes<W: Write>(
    out: &mut W,
    timestamp: &str,
    interfaces: &InterfaceDiff,
    addresses: &[AddressChange],
) -> io::Result<()> {
    for iface in &interfaces.added {
        writeln!(
            out,
            "[{timestamp}] interface {} added: MTU={}, HW={}",
            iface.name, iface.mtu, iface.hardware_addr
        )?;
    }
    for iface in &interfaces.removed {
        writeln!(out, "[{timestamp}] interface {} removed", iface.name)?;
    }
    for update in &interfaces.updated {
        writeln!(
            out,
            "[{timestamp}] interface {} updated: {}",
            update.name,
            update.changes.join(", ")
        )?;
    }
    for change in addresses {
        if !change.added.is_empty() {
            writeln!(
                out,
                "[{timestamp}] {} addresses added: {}",
                change.name,
                change.added.join(", ")
            )?;
        }
        if !change.removed.is_empty() {
            writeln!(
                out,
                "[{timestamp}] {} addresses removed: {}",
                change.name,
                change.removed.join(", ")
            )?;
        }
    }
    Ok(())
}
