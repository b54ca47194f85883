//! Core network types for interface and address representation.

use std::fmt;
use std::str::FromStr;

use ipnet::IpNet;
use serde::{Deserialize, Serialize};

/// Address family of an interface address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Family {
    /// IPv4.
    V4,
    /// IPv6.
    V6,
}

impl Family {
    /// Both families, in listing order.
    pub const ALL: [Self; 2] = [Self::V4, Self::V6];

    /// Returns the family of a parsed address.
    #[must_use]
    pub const fn of(addr: &IpNet) -> Self {
        match addr {
            IpNet::V4(_) => Self::V4,
            IpNet::V6(_) => Self::V6,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Parses `addr/prefix` text into an address and its canonical key.
///
/// The key is the `Display` form of the parsed value, so textual variants of
/// the same address and prefix length produce the same key.
///
/// ```
/// use ifstate::network::parse_address;
///
/// let (key, _) = parse_address("2001:DB8:0:0::10/64").unwrap();
/// assert_eq!(key, "2001:db8::10/64");
/// assert!(parse_address("192.0.2.1").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ipnet::AddrParseError`] if the text is not an address with an
/// explicit prefix length.
pub fn parse_address(raw: &str) -> Result<(String, IpNet), ipnet::AddrParseError> {
    let addr = IpNet::from_str(raw.trim())?;
    Ok((addr.to_string(), addr))
}

/// Properties of a single network interface at a point in time.
///
/// # Equality
///
/// Two interfaces are equal if name, hardware address, MTU, and flags
/// match exactly. Flag order matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Kernel name of the interface (e.g., "eth0").
    pub name: String,
    /// Hardware address, colon-separated lowercase hex. Empty when the
    /// interface has none.
    pub hardware_addr: String,
    /// Maximum transmission unit.
    pub mtu: u32,
    /// Interface flags (e.g., "up", "broadcast").
    pub flags: Vec<String>,
}

impl Interface {
    /// Creates a new interface description.
    #[must_use]
    pub fn new<I, S>(
        name: impl Into<String>,
        hardware_addr: impl Into<String>,
        mtu: u32,
        flags: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            hardware_addr: hardware_addr.into(),
            mtu,
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sorted, de-duplicated canonical addresses of one interface.
///
/// Entries are stored under their [`parse_address`] key, so two spellings of
/// the same address are one member. Text that does not parse is kept as
/// given, trimmed. Equality ignores the order in which addresses were
/// supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSet(Vec<String>);

impl AddressSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Iterates over the addresses in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for AddressSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut addrs: Vec<String> = iter
            .into_iter()
            .map(|raw| {
                let raw = raw.as_ref();
                parse_address(raw).map_or_else(|_| raw.trim().to_string(), |(key, _)| key)
            })
            .collect();
        addrs.sort();
        addrs.dedup();
        Self(addrs)
    }
}

impl fmt::Display for AddressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "none");
        }
        write!(f, "{}", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod family {
        use super::*;

        #[test]
        fn of_classifies_parsed_addresses() {
            let v4: IpNet = "10.0.0.1/24".parse().unwrap();
            let v6: IpNet = "2001:db8::1/64".parse().unwrap();

            assert_eq!(Family::of(&v4), Family::V4);
            assert_eq!(Family::of(&v6), Family::V6);
        }

        #[test]
        fn display_formats_correctly() {
            assert_eq!(Family::V4.to_string(), "IPv4");
            assert_eq!(Family::V6.to_string(), "IPv6");
        }

        #[test]
        fn v4_orders_before_v6() {
            assert!(Family::V4 < Family::V6);
        }
    }

    mod canonical {
        use super::*;

        #[test]
        fn keeps_host_bits() {
            let (key, _) = parse_address("10.0.0.5/24").unwrap();
            assert_eq!(key, "10.0.0.5/24");
        }

        #[test]
        fn normalizes_ipv6_text() {
            let (a, _) = parse_address("2001:0db8:0000::0010/64").unwrap();
            let (b, _) = parse_address("2001:db8::10/64").unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn trims_surrounding_whitespace() {
            let (key, _) = parse_address("  192.0.2.1/32 ").unwrap();
            assert_eq!(key, "192.0.2.1/32");
        }

        #[test]
        fn rejects_missing_prefix() {
            assert!(parse_address("192.0.2.1").is_err());
        }

        #[test]
        fn rejects_out_of_range_prefix() {
            assert!(parse_address("192.0.2.1/33").is_err());
        }

        #[test]
        fn rejects_garbage() {
            assert!(parse_address("not-an-ip").is_err());
        }
    }

    mod interface {
        use super::*;

        fn make_interface() -> Interface {
            Interface::new("eth0", "aa:bb", 1500, ["up", "broadcast"])
        }

        #[test]
        fn new_creates_interface_with_correct_fields() {
            let iface = make_interface();

            assert_eq!(iface.name, "eth0");
            assert_eq!(iface.hardware_addr, "aa:bb");
            assert_eq!(iface.mtu, 1500);
            assert_eq!(iface.flags, vec!["up", "broadcast"]);
        }

        #[test]
        fn equality_requires_same_mtu() {
            let mut other = make_interface();
            other.mtu = 9000;
            assert_ne!(make_interface(), other);
        }

        #[test]
        fn equality_requires_same_hardware_addr() {
            let mut other = make_interface();
            other.hardware_addr = "cc:dd".to_string();
            assert_ne!(make_interface(), other);
        }

        #[test]
        fn equality_is_sensitive_to_flag_order() {
            let other = Interface::new("eth0", "aa:bb", 1500, ["broadcast", "up"]);
            assert_ne!(make_interface(), other);
        }
    }

    mod address_set {
        use super::*;

        #[test]
        fn sorts_and_dedups() {
            let set: AddressSet = ["192.0.2.2/24", "192.0.2.1/24", "192.0.2.2/24"]
                .into_iter()
                .collect();

            assert_eq!(
                set.iter().collect::<Vec<_>>(),
                ["192.0.2.1/24", "192.0.2.2/24"]
            );
        }

        #[test]
        fn spellings_of_one_address_are_one_member() {
            let set: AddressSet = ["2001:DB8::1/64", "2001:db8:0:0::1/64", " 192.0.2.1/24"]
                .into_iter()
                .collect();

            assert_eq!(
                set.iter().collect::<Vec<_>>(),
                ["192.0.2.1/24", "2001:db8::1/64"]
            );
        }

        #[test]
        fn unparseable_entries_are_kept_verbatim() {
            let set: AddressSet = ["fe80::1%eth0/64", "192.0.2.1/24"].into_iter().collect();

            assert_eq!(
                set.iter().collect::<Vec<_>>(),
                ["192.0.2.1/24", "fe80::1%eth0/64"]
            );
        }

        #[test]
        fn equality_ignores_input_order() {
            let a: AddressSet = ["b", "a"].into_iter().collect();
            let b: AddressSet = ["a", "b"].into_iter().collect();
            assert_eq!(a, b);
        }

        #[test]
        fn display_joins_or_reports_none() {
            let set: AddressSet = ["b", "a"].into_iter().collect();
            assert_eq!(set.to_string(), "a, b");
            assert_eq!(AddressSet::new().to_string(), "none");
        }
    }
}
