//! Network layer for fetching and representing interface information.
//!
//! This module provides types and traits for:
//! - Representing interfaces and their addresses ([`Interface`], [`AddressSet`])
//! - Address families and canonical address keys ([`Family`], [`parse_address`])
//! - Fetching interface and address information ([`InterfaceProvider`], [`AddressProvider`])
//! - Sorted views over providers ([`Lister`], [`Viewer`])
//! - Platform-specific implementations ([`platform`])

mod fetcher;
mod interface;
pub mod platform;

pub use fetcher::{AddressProvider, FetchError, InterfaceProvider, Lister, Viewer};
pub use interface::{AddressSet, Family, Interface, parse_address};
