//! Canonical form of a desired address list.

use std::collections::{BTreeMap, BTreeSet};

use ipnet::IpNet;
use serde::{Deserialize, Serialize};

use super::ReconcileError;
use crate::network::{Family, parse_address};

/// Declared target state of one interface.
///
/// Missing fields deserialize as empty and are rejected when reconciling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredState {
    /// Name of the interface to configure.
    #[serde(default)]
    pub interface: String,
    /// Addresses in `addr/prefix` form.
    #[serde(default)]
    pub addresses: Vec<String>,
}

impl DesiredState {
    /// Creates a desired state.
    #[must_use]
    pub fn new<S: Into<String>>(
        interface: impl Into<String>,
        addresses: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            interface: interface.into(),
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Desired addresses keyed by canonical string, with the families present.
///
/// Textual variants of the same address and prefix length collapse into one
/// entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredAddressSet {
    addresses: BTreeMap<String, IpNet>,
    families: BTreeSet<Family>,
}

impl DesiredAddressSet {
    /// Parses raw `addr/prefix` strings.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::InvalidAddress`] for the first value that
    /// does not parse.
    pub fn parse<S: AsRef<str>>(raw: impl IntoIterator<Item = S>) -> Result<Self, ReconcileError> {
        let mut set = Self::default();
        for value in raw {
            let value = value.as_ref();
            let (key, addr) =
                parse_address(value).map_err(|source| ReconcileError::InvalidAddress {
                    value: value.to_string(),
                    source,
                })?;
            set.families.insert(Family::of(&addr));
            set.addresses.insert(key, addr);
        }
        Ok(set)
    }

    /// Addresses keyed by canonical string.
    #[must_use]
    pub const fn addresses(&self) -> &BTreeMap<String, IpNet> {
        &self.addresses
    }

    /// Families with at least one desired address, in [`Family`] order.
    pub fn families(&self) -> impl Iterator<Item = Family> + '_ {
        self.families.iter().copied()
    }
}
