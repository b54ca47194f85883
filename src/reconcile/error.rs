//! Error types for the reconcile layer.

use ipnet::AddrParseError;
use thiserror::Error;

use super::NetlinkError;
use crate::network::Family;

/// Error type for a reconciliation pass.
///
/// The first failure aborts the pass. Mutations issued before it are left in
/// place.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The desired state names no interface.
    #[error("Interface is required")]
    MissingInterface,

    /// The desired state lists no addresses.
    #[error("At least one address is required")]
    NoAddresses,

    /// A desired address is not valid `addr/prefix` text.
    #[error("Invalid address '{value}': {source}")]
    InvalidAddress {
        /// The raw value as supplied.
        value: String,
        /// The underlying parse error.
        #[source]
        source: AddrParseError,
    },

    /// Resolving the target interface failed.
    #[error("Failed to look up interface '{interface}': {source}")]
    Lookup {
        /// The interface name.
        interface: String,
        /// The underlying provider error.
        #[source]
        source: NetlinkError,
    },

    /// Listing the current addresses of one family failed.
    #[error("Failed to list {family} addresses: {source}")]
    List {
        /// The family being listed.
        family: Family,
        /// The underlying provider error.
        #[source]
        source: NetlinkError,
    },

    /// Adding an address failed.
    #[error("Failed to add address {address}: {source}")]
    Add {
        /// Canonical form of the address.
        address: String,
        /// The underlying provider error.
        #[source]
        source: NetlinkError,
    },

    /// Removing an address failed.
    #[error("Failed to remove address {address}: {source}")]
    Remove {
        /// Canonical form of the address.
        address: String,
        /// The underlying provider error.
        #[source]
        source: NetlinkError,
    },
}

impl ReconcileError {
    /// Returns true for errors raised before any provider mutation could run
    /// because the desired state itself is unusable.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingInterface | Self::NoAddresses | Self::InvalidAddress { .. }
        )
    }
}
