//! Reconciliation of a link's addresses against a desired state.

use std::collections::{BTreeMap, BTreeSet};

use ipnet::IpNet;

use super::{DesiredAddressSet, DesiredState, EditScript, NetlinkProvider, ReconcileError};
use crate::network::Family;

/// Applies a [`DesiredState`] through a [`NetlinkProvider`].
///
/// # Steps
///
/// 1. Validate the desired state (no provider call on failure)
/// 2. Resolve the link
/// 3. Parse the desired addresses into canonical form
/// 4. List current addresses of each inspected family
/// 5. Add every missing address, then remove every surplus one
///
/// By default only families present in the desired set are inspected, so
/// addresses of an omitted family are never removed. Enable
/// [`with_prune_absent_families`](Self::with_prune_absent_families) to
/// inspect both families.
///
/// An inspected family is matched exactly: when the desired set names IPv6,
/// kernel-assigned `fe80::/10` link-local addresses not listed in it are
/// removed too. A family inspected only through pruning keeps its
/// link-local addresses.
///
/// There is no rollback: a failed mutation aborts the pass and leaves earlier
/// mutations applied.
#[derive(Debug)]
pub struct Reconciler<P> {
    provider: P,
    prune_absent_families: bool,
}

impl<P: NetlinkProvider> Reconciler<P> {
    /// Creates a reconciler backed by `provider`.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            prune_absent_families: false,
        }
    }

    /// Also inspects, and prunes, families absent from the desired set.
    #[must_use]
    pub fn with_prune_absent_families(mut self, prune: bool) -> Self {
        self.prune_absent_families = prune;
        self
    }

    /// Computes the edit script without mutating anything.
    ///
    /// # Errors
    ///
    /// Returns a validation, lookup or list [`ReconcileError`].
    pub fn plan(&self, desired: &DesiredState) -> Result<EditScript, ReconcileError> {
        let (_, script) = self.prepare(desired)?;
        Ok(script)
    }

    /// Moves the link's addresses to the desired state.
    ///
    /// Returns the edit script that was applied. Applying the same state
    /// again yields an empty script.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReconcileError`] encountered.
    pub fn apply(&self, desired: &DesiredState) -> Result<EditScript, ReconcileError> {
        let (link, script) = self.prepare(desired)?;
        let interface = desired.interface.as_str();

        if script.is_empty() {
            tracing::info!("{interface} already matches the desired state");
            return Ok(script);
        }

        for addr in script.additions() {
            self.provider
                .addr_add(&link, addr)
                .map_err(|source| ReconcileError::Add {
                    address: addr.to_string(),
                    source,
                })?;
            tracing::info!("Added {addr} to {interface}");
        }

        for addr in script.removals() {
            self.provider
                .addr_del(&link, addr)
                .map_err(|source| ReconcileError::Remove {
                    address: addr.to_string(),
                    source,
                })?;
            tracing::info!("Removed {addr} from {interface}");
        }

        Ok(script)
    }

    fn prepare(&self, desired: &DesiredState) -> Result<(P::Link, EditScript), ReconcileError> {
        if desired.interface.is_empty() {
            return Err(ReconcileError::MissingInterface);
        }
        if desired.addresses.is_empty() {
            return Err(ReconcileError::NoAddresses);
        }

        let link = self
            .provider
            .link_by_name(&desired.interface)
            .map_err(|source| ReconcileError::Lookup {
                interface: desired.interface.clone(),
                source,
            })?;

        let wanted = DesiredAddressSet::parse(&desired.addresses)?;
        let requested: BTreeSet<Family> = wanted.families().collect();
        let families: Vec<Family> = if self.prune_absent_families {
            Family::ALL.to_vec()
        } else {
            requested.iter().copied().collect()
        };

        let mut current = BTreeMap::new();
        for family in families {
            let listed = self
                .provider
                .addr_list(&link, family)
                .map_err(|source| ReconcileError::List { family, source })?;
            tracing::debug!(
                "{} has {} {family} address(es)",
                desired.interface,
                listed.len()
            );
            let pruned_only = !requested.contains(&family);
            current.extend(
                listed
                    .into_iter()
                    .filter(|addr| !(pruned_only && is_link_local(addr)))
                    .map(|addr: IpNet| (addr.to_string(), addr)),
            );
        }

        let script = EditScript::compute(wanted.addresses(), &current);
        for line in script.to_string().lines() {
            tracing::debug!("Planned {line} on {}", desired.interface);
        }
        Ok((link, script))
    }
}

fn is_link_local(addr: &IpNet) -> bool {
    matches!(addr, IpNet::V6(net) if net.addr().is_unicast_link_local())
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
