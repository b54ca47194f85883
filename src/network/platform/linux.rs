//! Linux interface and address listing.

use std::collections::BTreeSet;
use std::fs;
use std::net::{IpAddr, SocketAddrV4, SocketAddrV6};
use std::path::PathBuf;

use ipnet::{IpNet, ipv4_mask_to_prefix, ipv6_mask_to_prefix};
use nix::ifaddrs::{InterfaceAddress, getifaddrs};
use nix::net::if_::InterfaceFlags;

use crate::network::{AddressProvider, FetchError, Interface, InterfaceProvider};

/// Flag names in the order they are reported.
const FLAG_NAMES: [(InterfaceFlags, &str); 6] = [
    (InterfaceFlags::IFF_UP, "up"),
    (InterfaceFlags::IFF_BROADCAST, "broadcast"),
    (InterfaceFlags::IFF_LOOPBACK, "loopback"),
    (InterfaceFlags::IFF_POINTOPOINT, "pointtopoint"),
    (InterfaceFlags::IFF_MULTICAST, "multicast"),
    (InterfaceFlags::IFF_RUNNING, "running"),
];

/// Live provider backed by `getifaddrs(3)`.
///
/// Implements both [`InterfaceProvider`] and [`AddressProvider`]. IPv4
/// addresses carrying a label (`eth0:1`) are reported on their link.
#[derive(Debug, Clone)]
pub struct SystemProvider {
    sysfs_root: PathBuf,
}

impl Default for SystemProvider {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from("/sys/class/net"),
        }
    }
}

impl SystemProvider {
    /// Creates a provider reading MTUs from `/sys/class/net`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_mtu(&self, name: &str) -> u32 {
        let path = self.sysfs_root.join(name).join("mtu");
        match fs::read_to_string(&path) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
                tracing::warn!("Unparseable MTU in {}: {e}", path.display());
                0
            }),
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", path.display());
                0
            }
        }
    }
}

/// One `getifaddrs` record, reduced to what the listings need.
#[derive(Debug, Clone)]
struct Entry {
    name: String,
    flags: InterfaceFlags,
    /// Set on the `AF_PACKET` record of a link.
    link: bool,
    mac: Option<String>,
    net: Option<IpNet>,
}

impl Entry {
    fn new(raw: &InterfaceAddress) -> Self {
        Self {
            name: raw.interface_name.clone(),
            flags: raw.flags,
            link: raw
                .address
                .as_ref()
                .is_some_and(|a| a.as_link_addr().is_some()),
            mac: link_address(raw),
            net: ip_network(raw),
        }
    }
}

fn read_entries() -> Result<Vec<Entry>, FetchError> {
    Ok(getifaddrs()?.map(|raw| Entry::new(&raw)).collect())
}

/// Names that own an `AF_PACKET` record, i.e. real links.
fn link_names(entries: &[Entry]) -> BTreeSet<&str> {
    entries
        .iter()
        .filter(|e| e.link)
        .map(|e| e.name.as_str())
        .collect()
}

/// Maps an IPv4 label such as `eth0:1` back to the link it lives on.
fn owner<'a>(name: &'a str, links: &BTreeSet<&str>) -> &'a str {
    if links.contains(name) {
        return name;
    }
    match name.split_once(':') {
        Some((link, _)) if links.contains(link) => link,
        _ => name,
    }
}

/// Groups records into one interface per link, in first-seen order.
fn group_interfaces(entries: &[Entry], mtu: impl Fn(&str) -> u32) -> Vec<Interface> {
    let links = link_names(entries);
    let mut interfaces: Vec<Interface> = Vec::new();

    for entry in entries {
        let name = owner(&entry.name, &links);
        let index = match interfaces.iter().position(|i| i.name == name) {
            Some(index) => index,
            None => {
                interfaces.push(Interface::new(name, "", mtu(name), flag_names(entry.flags)));
                interfaces.len() - 1
            }
        };

        let iface = &mut interfaces[index];
        if entry.name == name {
            iface.flags = flag_names(entry.flags);
        }
        if let Some(mac) = &entry.mac {
            iface.hardware_addr.clone_from(mac);
        }
    }

    interfaces
}

/// Addresses on link `name`, including labeled ones, or `None` if no record
/// belongs to it.
fn link_addresses(entries: &[Entry], name: &str) -> Option<Vec<String>> {
    let links = link_names(entries);
    let mut owned = entries
        .iter()
        .filter(|e| owner(&e.name, &links) == name)
        .peekable();
    owned.peek()?;
    Some(
        owned
            .filter_map(|e| e.net.as_ref().map(ToString::to_string))
            .collect(),
    )
}

impl InterfaceProvider for SystemProvider {
    fn list_interfaces(&self) -> Result<Vec<Interface>, FetchError> {
        let entries = read_entries()?;
        Ok(group_interfaces(&entries, |name| self.read_mtu(name)))
    }
}

impl AddressProvider for SystemProvider {
    fn interface_addresses(&self, name: &str) -> Result<Vec<String>, FetchError> {
        link_addresses(&read_entries()?, name).ok_or_else(|| FetchError::NotFound {
            name: name.to_string(),
        })
    }
}

fn flag_names(flags: InterfaceFlags) -> Vec<String> {
    FLAG_NAMES
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, name)| (*name).to_string())
        .collect()
}

/// Hardware address of an `AF_PACKET` entry; all-zero addresses are omitted.
fn link_address(entry: &InterfaceAddress) -> Option<String> {
    let mac = entry.address.as_ref()?.as_link_addr()?.addr()?;
    if mac.iter().all(|b| *b == 0) {
        return None;
    }
    Some(
        mac.iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":"),
    )
}

fn ip_network(entry: &InterfaceAddress) -> Option<IpNet> {
    let address = entry.address.as_ref()?;
    let netmask = entry.netmask.as_ref();

    if let Some(sin) = address.as_sockaddr_in() {
        let ip = *SocketAddrV4::from(*sin).ip();
        let prefix = netmask
            .and_then(|m| m.as_sockaddr_in())
            .and_then(|m| ipv4_mask_to_prefix(*SocketAddrV4::from(*m).ip()).ok())
            .unwrap_or(32);
        return IpNet::new(IpAddr::V4(ip), prefix).ok();
    }

    if let Some(sin6) = address.as_sockaddr_in6() {
        let ip = *SocketAddrV6::from(*sin6).ip();
        let prefix = netmask
            .and_then(|m| m.as_sockaddr_in6())
            .and_then(|m| ipv6_mask_to_prefix(*SocketAddrV6::from(*m).ip()).ok())
            .unwrap_or(128);
        return IpNet::new(IpAddr::V6(ip), prefix).ok();
    }

    None
}
