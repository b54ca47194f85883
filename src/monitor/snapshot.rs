//! Point-in-time capture of interface and address state.

use std::collections::BTreeMap;

use crate::network::{
    AddressProvider, AddressSet, FetchError, Interface, InterfaceProvider, Lister, Viewer,
    parse_address,
};

/// Interfaces and their address sets captured in one collection cycle.
///
/// A snapshot is never patched; the next poll replaces it entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    interfaces: BTreeMap<String, Interface>,
    addresses: BTreeMap<String, AddressSet>,
}

impl Snapshot {
    /// Builds a snapshot from interfaces and per-interface address sets.
    #[must_use]
    pub fn new(
        interfaces: impl IntoIterator<Item = Interface>,
        addresses: impl IntoIterator<Item = (String, AddressSet)>,
    ) -> Self {
        Self {
            interfaces: interfaces
                .into_iter()
                .map(|iface| (iface.name.clone(), iface))
                .collect(),
            addresses: addresses.into_iter().collect(),
        }
    }

    /// Collects a snapshot from the given providers.
    ///
    /// Reported addresses are stored in canonical form. With a `filter`, only
    /// the named interface is retained. If it is not
    /// present, its address set is recorded as empty so that its later
    /// appearance shows up as an addition.
    ///
    /// # Errors
    ///
    /// Returns the first [`FetchError`] from either provider.
    pub fn collect<I, A>(
        lister: &Lister<I>,
        viewer: &Viewer<A>,
        filter: Option<&str>,
    ) -> Result<Self, FetchError>
    where
        I: InterfaceProvider,
        A: AddressProvider,
    {
        let mut interfaces = Vec::new();
        let mut addresses: Vec<(String, AddressSet)> = Vec::new();

        for iface in lister.list()? {
            if filter.is_some_and(|name| name != iface.name) {
                continue;
            }
            let raw = viewer.view(&iface.name)?;
            for bad in raw.iter().filter(|a| parse_address(a).is_err()) {
                tracing::warn!("{} reports unparseable address {bad:?}", iface.name);
            }
            addresses.push((iface.name.clone(), raw.into_iter().collect()));
            interfaces.push(iface);
        }

        let absent = filter.filter(|name| !addresses.iter().any(|(n, _)| n == name));
        if let Some(name) = absent {
            addresses.push((name.to_string(), AddressSet::new()));
        }

        Ok(Self::new(interfaces, addresses))
    }

    /// Interfaces keyed by name.
    #[must_use]
    pub const fn interfaces(&self) -> &BTreeMap<String, Interface> {
        &self.interfaces
    }

    /// Address sets keyed by interface name.
    #[must_use]
    pub const fn addresses(&self) -> &BTreeMap<String, AddressSet> {
        &self.addresses
    }

    /// Returns the address set of an interface, if recorded.
    #[must_use]
    pub fn addresses_of(&self, name: &str) -> Option<&AddressSet> {
        self.addresses.get(name)
    }

    /// Returns true if no interface was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticInterfaces(Vec<Interface>);

    impl InterfaceProvider for StaticInterfaces {
        fn list_interfaces(&self) -> Result<Vec<Interface>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct StaticAddresses(HashMap<&'static str, Vec<&'static str>>);

    impl AddressProvider for StaticAddresses {
        fn interface_addresses(&self, name: &str) -> Result<Vec<String>, FetchError> {
            self.0
                .get(name)
                .map(|addrs| addrs.iter().map(ToString::to_string).collect())
                .ok_or_else(|| FetchError::NotFound {
                    name: name.to_string(),
                })
        }
    }

    fn providers() -> (Lister<StaticInterfaces>, Viewer<StaticAddresses>) {
        let lister = Lister::new(StaticInterfaces(vec![
            Interface::new("eth0", "aa:bb", 1500, ["up"]),
            Interface::new("lo", "", 65536, ["up", "loopback"]),
        ]));
        let viewer = Viewer::new(StaticAddresses(HashMap::from([
            ("eth0", vec!["192.0.2.9/24", "192.0.2.1/24"]),
            ("lo", vec!["127.0.0.1/8"]),
        ])));
        (lister, viewer)
    }

    #[test]
    fn collect_captures_all_interfaces() {
        let (lister, viewer) = providers();

        let snapshot = Snapshot::collect(&lister, &viewer, None).unwrap();

        assert_eq!(snapshot.interfaces().len(), 2);
        assert_eq!(
            snapshot.addresses_of("eth0").unwrap().iter().collect::<Vec<_>>(),
            ["192.0.2.1/24", "192.0.2.9/24"]
        );
    }

    #[test]
    fn collect_canonicalizes_reported_addresses() {
        let lister = Lister::new(StaticInterfaces(vec![Interface::new(
            "eth0",
            "aa:bb",
            1500,
            ["up"],
        )]));
        let upper = Viewer::new(StaticAddresses(HashMap::from([(
            "eth0",
            vec!["2001:DB8::1/64", "2001:db8:0:0::1/64"],
        )])));
        let lower = Viewer::new(StaticAddresses(HashMap::from([(
            "eth0",
            vec!["2001:db8::1/64"],
        )])));

        let first = Snapshot::collect(&lister, &upper, None).unwrap();
        let second = Snapshot::collect(&lister, &lower, None).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.addresses_of("eth0").unwrap().iter().collect::<Vec<_>>(),
            ["2001:db8::1/64"]
        );
    }

    #[test]
    fn collect_retains_only_filtered_interface() {
        let (lister, viewer) = providers();

        let snapshot = Snapshot::collect(&lister, &viewer, Some("lo")).unwrap();

        assert_eq!(snapshot.interfaces().keys().collect::<Vec<_>>(), ["lo"]);
        assert!(snapshot.addresses_of("eth0").is_none());
    }

    #[test]
    fn collect_records_empty_set_for_missing_filtered_interface() {
        let (lister, viewer) = providers();

        let snapshot = Snapshot::collect(&lister, &viewer, Some("wg0")).unwrap();

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.addresses_of("wg0"), Some(&AddressSet::new()));
    }

    #[test]
    fn collect_propagates_address_errors() {
        let lister = Lister::new(StaticInterfaces(vec![Interface::new(
            "eth5",
            "",
            1500,
            Vec::<String>::new(),
        )]));
        let viewer = Viewer::new(StaticAddresses(HashMap::new()));

        let result = Snapshot::collect(&lister, &viewer, None);

        assert!(matches!(result, Err(FetchError::NotFound { .. })));
    }

    #[test]
    fn new_keys_interfaces_by_name() {
        let snapshot = Snapshot::new(
            [Interface::new("eth0", "aa:bb", 1500, ["up"])],
            [("eth0".to_string(), AddressSet::new())],
        );

        assert!(snapshot.interfaces().contains_key("eth0"));
        assert!(!snapshot.is_empty());
    }
}
