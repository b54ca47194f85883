//! Netlink capability trait used by the reconciler.

use std::io;

use ipnet::IpNet;
use thiserror::Error;

use crate::network::Family;

/// Error type for netlink provider calls.
#[derive(Debug, Error)]
pub enum NetlinkError {
    /// The kernel rejected or failed a request.
    #[cfg(target_os = "linux")]
    #[error("Netlink request failed: {0}")]
    Netlink(#[from] rtnetlink::Error),

    /// No link with the requested name exists.
    #[error("Link '{name}' not found")]
    LinkNotFound {
        /// The requested link name.
        name: String,
    },

    /// The netlink connection could not be set up.
    #[error("Failed to open netlink connection: {0}")]
    Connection(#[from] io::Error),

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Address mutation capability of the host.
///
/// Calls are synchronous and may block. The reconciler issues them strictly
/// one after another.
pub trait NetlinkProvider: Send + Sync {
    /// Opaque handle of a resolved link.
    type Link;

    /// Resolves a link by interface name.
    ///
    /// # Errors
    ///
    /// Returns [`NetlinkError::LinkNotFound`] if no such link exists.
    fn link_by_name(&self, name: &str) -> Result<Self::Link, NetlinkError>;

    /// Lists the addresses of one family on a link.
    ///
    /// # Errors
    ///
    /// Returns [`NetlinkError`] if the query fails.
    fn addr_list(&self, link: &Self::Link, family: Family) -> Result<Vec<IpNet>, NetlinkError>;

    /// Adds an address to a link.
    ///
    /// # Errors
    ///
    /// Returns [`NetlinkError`] if the kernel rejects the request.
    fn addr_add(&self, link: &Self::Link, addr: &IpNet) -> Result<(), NetlinkError>;

    /// Removes an address from a link.
    ///
    /// # Errors
    ///
    /// Returns [`NetlinkError`] if the kernel rejects the request.
    fn addr_del(&self, link: &Self::Link, addr: &IpNet) -> Result<(), NetlinkError>;
}
