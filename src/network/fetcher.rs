//! Provider traits for interface and address listing, and their wrappers.

use super::Interface;
use thiserror::Error;

/// Error type for interface and address listing.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A system call failed.
    #[cfg(target_os = "linux")]
    #[error("System error: {0}")]
    Os(#[from] nix::Error),

    /// The named interface does not exist.
    #[error("Interface '{name}' not found")]
    NotFound {
        /// The requested interface name.
        name: String,
    },

    /// An address lookup was requested without an interface name.
    #[error("Interface name is required")]
    EmptyName,

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Source of interface information.
///
/// Implementations should return ALL interfaces; filtering is done by the
/// caller. This is a synchronous operation and may block.
pub trait InterfaceProvider: Send + Sync {
    /// Lists the interfaces currently present on the host.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the platform query fails.
    fn list_interfaces(&self) -> Result<Vec<Interface>, FetchError>;
}

/// Source of per-interface address information.
pub trait AddressProvider: Send + Sync {
    /// Lists the addresses of the named interface as `addr/prefix` strings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] if the interface does not exist, or
    /// another [`FetchError`] if the platform query fails.
    fn interface_addresses(&self, name: &str) -> Result<Vec<String>, FetchError>;
}

/// Lists interfaces in name order.
#[derive(Debug, Clone)]
pub struct Lister<P> {
    provider: P,
}

impl<P: InterfaceProvider> Lister<P> {
    /// Creates a lister backed by `provider`.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns all interfaces sorted by name.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`FetchError`].
    pub fn list(&self) -> Result<Vec<Interface>, FetchError> {
        let mut interfaces = self.provider.list_interfaces()?;
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(interfaces)
    }
}

/// Looks up addresses of a single interface in sorted order.
#[derive(Debug, Clone)]
pub struct Viewer<P> {
    provider: P,
}

impl<P: AddressProvider> Viewer<P> {
    /// Creates a viewer backed by `provider`.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns the addresses of `name`, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::EmptyName`] for an empty name without calling
    /// the provider; otherwise propagates the provider's error.
    pub fn view(&self, name: &str) -> Result<Vec<String>, FetchError> {
        if name.is_empty() {
            return Err(FetchError::EmptyName);
        }
        let mut addrs = self.provider.interface_addresses(name)?;
        addrs.sort();
        Ok(addrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StaticInterfaces(Vec<Interface>);

    impl InterfaceProvider for StaticInterfaces {
        fn list_interfaces(&self) -> Result<Vec<Interface>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingInterfaces;

    impl InterfaceProvider for FailingInterfaces {
        fn list_interfaces(&self) -> Result<Vec<Interface>, FetchError> {
            Err(FetchError::Platform {
                message: "boom".to_string(),
            })
        }
    }

    /// Records every lookup so tests can assert the provider was not reached.
    struct RecordingAddresses {
        addrs: HashMap<String, Vec<String>>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingAddresses {
        fn new(entries: &[(&str, &[&str])]) -> Self {
            Self {
                addrs: entries
                    .iter()
                    .map(|(name, addrs)| {
                        (
                            (*name).to_string(),
                            addrs.iter().map(ToString::to_string).collect(),
                        )
                    })
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl AddressProvider for RecordingAddresses {
        fn interface_addresses(&self, name: &str) -> Result<Vec<String>, FetchError> {
            self.calls.lock().unwrap().push(name.to_string());
            self.addrs
                .get(name)
                .cloned()
                .ok_or_else(|| FetchError::NotFound {
                    name: name.to_string(),
                })
        }
    }

    #[test]
    fn lister_sorts_by_name() {
        let lister = Lister::new(StaticInterfaces(vec![
            Interface::new("wlan0", "", 1500, Vec::<String>::new()),
            Interface::new("eth0", "", 1500, Vec::<String>::new()),
            Interface::new("lo", "", 65536, ["up", "loopback"]),
        ]));

        let names: Vec<_> = lister.list().unwrap().into_iter().map(|i| i.name).collect();

        assert_eq!(names, ["eth0", "lo", "wlan0"]);
    }

    #[test]
    fn lister_propagates_errors() {
        let lister = Lister::new(FailingInterfaces);
        let error = lister.list().unwrap_err();
        assert!(error.to_string().contains("boom"));
    }

    #[test]
    fn viewer_sorts_addresses() {
        let viewer = Viewer::new(RecordingAddresses::new(&[(
            "eth0",
            &["192.0.2.9/24", "192.0.2.1/24"],
        )]));

        assert_eq!(viewer.view("eth0").unwrap(), ["192.0.2.1/24", "192.0.2.9/24"]);
    }

    #[test]
    fn viewer_rejects_empty_name_without_calling_provider() {
        let provider = RecordingAddresses::new(&[]);
        let viewer = Viewer::new(provider);

        let result = viewer.view("");

        assert!(matches!(result, Err(FetchError::EmptyName)));
        assert!(viewer.provider.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn viewer_propagates_not_found() {
        let viewer = Viewer::new(RecordingAddresses::new(&[]));
        let error = viewer.view("eth9").unwrap_err();
        assert_eq!(error.to_string(), "Interface 'eth9' not found");
    }

    #[test]
    fn platform_error_displays_message() {
        let error = FetchError::Platform {
            message: "unsupported operation".to_string(),
        };
        assert!(error.to_string().contains("unsupported operation"));
    }
}
