//! Change detection between consecutive snapshots.

use std::collections::{BTreeMap, BTreeSet};

use crate::network::{AddressSet, Interface};

/// Descriptor used when an update carries no field difference.
pub const NO_VISIBLE_DIFFERENCE: &str = "no visible field differences";

/// An interface present in both snapshots whose fields changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceUpdate {
    /// Name shared by both states.
    pub name: String,
    /// State in the previous snapshot.
    pub before: Interface,
    /// State in the current snapshot.
    pub after: Interface,
    /// Human-readable per-field changes, never empty.
    pub changes: Vec<String>,
}

impl InterfaceUpdate {
    /// Creates an update and computes its change descriptors.
    #[must_use]
    pub fn new(before: Interface, after: Interface) -> Self {
        let changes = describe_update(&before, &after);
        Self {
            name: after.name.clone(),
            before,
            after,
            changes,
        }
    }
}

/// Interface-level differences between two snapshots.
///
/// Each list is sorted by name and no name appears in more than one list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceDiff {
    /// Interfaces only in the current snapshot.
    pub added: Vec<Interface>,
    /// Interfaces only in the previous snapshot.
    pub removed: Vec<Interface>,
    /// Interfaces in both snapshots with differing fields.
    pub updated: Vec<InterfaceUpdate>,
}

impl InterfaceDiff {
    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

/// Address changes of a single interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressChange {
    /// Interface name.
    pub name: String,
    /// Addresses present now but not before, sorted.
    pub added: Vec<String>,
    /// Addresses present before but not now, sorted.
    pub removed: Vec<String>,
}

/// Compares two interface maps keyed by name.
///
/// This is a pure function. An interface whose name persists is an update,
/// never an add/remove pair, no matter which of its fields changed.
#[must_use]
pub fn diff_interfaces(
    prev: &BTreeMap<String, Interface>,
    curr: &BTreeMap<String, Interface>,
) -> InterfaceDiff {
    let mut diff = InterfaceDiff::default();

    // BTreeMap iteration keeps every list sorted by name.
    for (name, iface) in curr {
        match prev.get(name) {
            None => diff.added.push(iface.clone()),
            Some(before) if before != iface => {
                diff.updated
                    .push(InterfaceUpdate::new(before.clone(), iface.clone()));
            }
            Some(_) => {}
        }
    }

    diff.removed = prev
        .iter()
        .filter(|(name, _)| !curr.contains_key(*name))
        .map(|(_, iface)| iface.clone())
        .collect();

    diff
}

/// Describes which fields differ between two states of an interface.
///
/// Descriptors are listed in MTU, hardware address, flags order. When no
/// field differs the result is the single [`NO_VISIBLE_DIFFERENCE`] entry.
#[must_use]
pub fn describe_update(before: &Interface, after: &Interface) -> Vec<String> {
    let mut changes = Vec::new();

    if before.mtu != after.mtu {
        changes.push(format!("MTU {}→{}", before.mtu, after.mtu));
    }
    if before.hardware_addr != after.hardware_addr {
        changes.push(format!(
            "HW {}→{}",
            before.hardware_addr, after.hardware_addr
        ));
    }
    if before.flags != after.flags {
        changes.push(format!(
            "flags [{}]→[{}]",
            before.flags.join(","),
            after.flags.join(",")
        ));
    }

    if changes.is_empty() {
        changes.push(NO_VISIBLE_DIFFERENCE.to_string());
    }
    changes
}

/// Compares address sets per interface name.
///
/// Names from both maps are visited in sorted order; a name missing on one
/// side counts as an empty set there. Only interfaces with at least one
/// added or removed address produce an entry.
#[must_use]
pub fn diff_addresses(
    prev: &BTreeMap<String, AddressSet>,
    curr: &BTreeMap<String, AddressSet>,
) -> Vec<AddressChange> {
    let names: BTreeSet<&String> = prev.keys().chain(curr.keys()).collect();
    let empty = AddressSet::new();

    names
        .into_iter()
        .filter_map(|name| {
            let old = prev.get(name).unwrap_or(&empty);
            let new = curr.get(name).unwrap_or(&empty);
            let (added, removed) = diff_sets(old, new);

            if added.is_empty() && removed.is_empty() {
                None
            } else {
                Some(AddressChange {
                    name: name.clone(),
                    added,
                    removed,
                })
            }
        })
        .collect()
}

fn diff_sets(old: &AddressSet, new: &AddressSet) -> (Vec<String>, Vec<String>) {
    let old: BTreeSet<&str> = old.iter().collect();
    let new: BTreeSet<&str> = new.iter().collect();

    let added = new.difference(&old).map(|s| (*s).to_string()).collect();
    let removed = old.difference(&new).map(|s| (*s).to_string()).collect();
    (added, removed)
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
