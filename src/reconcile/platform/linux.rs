//! rtnetlink-backed address mutation.

use std::net::IpAddr;

use futures::TryStreamExt;
use ipnet::IpNet;
use rtnetlink::Handle;
use rtnetlink::packet_route::AddressFamily;
use rtnetlink::packet_route::address::{AddressAttribute, AddressMessage};
use tokio::runtime::{Builder, Runtime};

use crate::network::Family;
use crate::reconcile::{NetlinkError, NetlinkProvider};

/// Resolved link, identified by its kernel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkHandle {
    /// Kernel interface index.
    pub index: u32,
}

/// [`NetlinkProvider`] talking to the kernel over an rtnetlink socket.
///
/// Owns a private current-thread runtime that drives the connection. Each
/// request blocks on that runtime, so the provider must not be used from
/// within another tokio runtime.
pub struct RtnetlinkProvider {
    runtime: Runtime,
    handle: Handle,
}

impl RtnetlinkProvider {
    /// Opens a netlink connection.
    ///
    /// # Errors
    ///
    /// Returns [`NetlinkError::Connection`] if the runtime or socket cannot
    /// be created.
    pub fn new() -> Result<Self, NetlinkError> {
        let runtime = Builder::new_current_thread().enable_io().build()?;
        let handle = {
            let _guard = runtime.enter();
            let (connection, handle, _) = rtnetlink::new_connection()?;
            runtime.spawn(connection);
            handle
        };
        Ok(Self { runtime, handle })
    }
}

impl NetlinkProvider for RtnetlinkProvider {
    type Link = LinkHandle;

    fn link_by_name(&self, name: &str) -> Result<LinkHandle, NetlinkError> {
        let link = self.runtime.block_on(async {
            self.handle
                .link()
                .get()
                .match_name(name.to_string())
                .execute()
                .try_next()
                .await
        })?;

        link.map(|msg| LinkHandle {
            index: msg.header.index,
        })
        .ok_or_else(|| NetlinkError::LinkNotFound {
            name: name.to_string(),
        })
    }

    /// Every address of the family on the link, whatever its scope. IPv6
    /// results include kernel-assigned link-local addresses.
    fn addr_list(&self, link: &LinkHandle, family: Family) -> Result<Vec<IpNet>, NetlinkError> {
        let wanted = match family {
            Family::V4 => AddressFamily::Inet,
            Family::V6 => AddressFamily::Inet6,
        };

        let messages: Vec<AddressMessage> = self.runtime.block_on(async {
            self.handle
                .address()
                .get()
                .set_link_index_filter(link.index)
                .execute()
                .try_collect()
                .await
        })?;

        Ok(messages
            .iter()
            .filter(|msg| msg.header.family == wanted)
            .filter_map(to_ipnet)
            .collect())
    }

    fn addr_add(&self, link: &LinkHandle, addr: &IpNet) -> Result<(), NetlinkError> {
        self.runtime.block_on(async {
            self.handle
                .address()
                .add(link.index, addr.addr(), addr.prefix_len())
                .execute()
                .await
        })?;
        Ok(())
    }

    fn addr_del(&self, link: &LinkHandle, addr: &IpNet) -> Result<(), NetlinkError> {
        let mut msg = AddressMessage::default();
        msg.header.index = link.index;
        msg.header.prefix_len = addr.prefix_len();
        msg.header.family = match addr {
            IpNet::V4(_) => AddressFamily::Inet,
            IpNet::V6(_) => AddressFamily::Inet6,
        };
        // IPv4 addresses are matched on IFA_LOCAL.
        if addr.addr().is_ipv4() {
            msg.attributes.push(AddressAttribute::Local(addr.addr()));
        }
        msg.attributes.push(AddressAttribute::Address(addr.addr()));

        self.runtime
            .block_on(async { self.handle.address().del(msg).execute().await })?;
        Ok(())
    }
}

/// Prefers the local address, which differs from `IFA_ADDRESS` on
/// point-to-point links.
fn to_ipnet(msg: &AddressMessage) -> Option<IpNet> {
    let mut address: Option<IpAddr> = None;
    for attr in &msg.attributes {
        match attr {
            AddressAttribute::Local(ip) => return IpNet::new(*ip, msg.header.prefix_len).ok(),
            AddressAttribute::Address(ip) => address = Some(*ip),
            _ => {}
        }
    }
    address.and_then(|ip| IpNet::new(ip, msg.header.prefix_len).ok())
}
