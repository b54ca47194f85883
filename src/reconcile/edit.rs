//! Edit script between desired and current address state.

use std::collections::BTreeMap;
use std::fmt;

use ipnet::IpNet;

/// Additions and removals that move current state to desired state.
///
/// Both sides are keyed by canonical address string and iterate in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    add: BTreeMap<String, IpNet>,
    remove: BTreeMap<String, IpNet>,
}

impl EditScript {
    /// Computes `desired \ current` as additions and `current \ desired` as
    /// removals.
    #[must_use]
    pub fn compute(desired: &BTreeMap<String, IpNet>, current: &BTreeMap<String, IpNet>) -> Self {
        Self {
            add: difference(desired, current),
            remove: difference(current, desired),
        }
    }

    /// Addresses to add, in canonical key order.
    pub fn additions(&self) -> impl Iterator<Item = &IpNet> {
        self.add.values()
    }

    /// Addresses to remove, in canonical key order.
    pub fn removals(&self) -> impl Iterator<Item = &IpNet> {
        self.remove.values()
    }

    /// Total number of mutations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.add.len() + self.remove.len()
    }

    /// Returns true if current state already matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

fn difference(
    from: &BTreeMap<String, IpNet>,
    other: &BTreeMap<String, IpNet>,
) -> BTreeMap<String, IpNet> {
    from.iter()
        .filter(|(key, _)| !other.contains_key(*key))
        .map(|(key, addr)| (key.clone(), *addr))
        .collect()
}

/// One `+ addr` line per addition followed by one `- addr` line per removal.
impl fmt::Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .add
            .keys()
            .map(|key| ('+', key))
            .chain(self.remove.keys().map(|key| ('-', key)));

        for (i, (sign, key)) in lines.enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{sign} {key}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(addrs: &[&str]) -> BTreeMap<String, IpNet> {
        addrs
            .iter()
            .map(|raw| {
                let addr: IpNet = raw.parse().unwrap();
                (addr.to_string(), addr)
            })
            .collect()
    }

    #[test]
    fn computes_both_differences() {
        let desired = keyed(&["10.0.0.10/24", "2001:db8::10/64"]);
        let current = keyed(&["10.0.0.5/24", "10.0.0.10/24"]);

        let script = EditScript::compute(&desired, &current);

        let add: Vec<_> = script.additions().map(ToString::to_string).collect();
        let remove: Vec<_> = script.removals().map(ToString::to_string).collect();
        assert_eq!(add, ["2001:db8::10/64"]);
        assert_eq!(remove, ["10.0.0.5/24"]);
        assert_eq!(script.len(), 2);
    }

    #[test]
    fn matching_state_is_empty() {
        let state = keyed(&["10.0.0.10/24"]);

        assert!(EditScript::compute(&state, &state).is_empty());
    }

    #[test]
    fn display_lists_additions_before_removals() {
        let desired = keyed(&["192.0.2.2/24", "192.0.2.1/24"]);
        let current = keyed(&["198.51.100.1/24"]);

        let script = EditScript::compute(&desired, &current);

        assert_eq!(
            script.to_string(),
            "+ 192.0.2.1/24\n+ 192.0.2.2/24\n- 198.51.100.1/24"
        );
    }

    #[test]
    fn empty_script_displays_nothing() {
        assert_eq!(EditScript::default().to_string(), "");
    }
}
