//! Command execution logic.
//!
//! Each command is a generic function over its providers and output sink so
//! that it can be tested with in-memory doubles; [`execute`] wires in the
//! live platform providers.

use std::future::Future;
use std::io::{self, Write};

use thiserror::Error;
use tokio::signal;

use ifstate::config::{
    ApplySettings, Command, ConfigError, MonitorSettings, TomlConfig, load_desired_state,
    write_default_config,
};
use ifstate::monitor::{WatchError, Watcher};
use ifstate::network::{AddressProvider, FetchError, InterfaceProvider, Lister, Viewer};
use ifstate::reconcile::{DesiredState, NetlinkError, NetlinkProvider, ReconcileError, Reconciler};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Invalid settings or unreadable input files.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Listing interfaces or addresses failed.
    #[error("Failed to read interface state: {0}")]
    Fetch(#[from] FetchError),

    /// The netlink provider could not be created.
    #[error("Failed to open netlink provider: {0}")]
    Netlink(#[from] NetlinkError),

    /// Reconciliation failed.
    #[error("Failed to apply configuration: {0}")]
    Reconcile(#[from] ReconcileError),

    /// The watcher stopped with a failure.
    #[error("Monitor failed: {0}")]
    Watch(#[from] WatchError),

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// Failed to create the async runtime for the monitor.
    #[error("Failed to create async runtime: {0}")]
    Runtime(#[source] io::Error),

    /// No live provider exists for this platform.
    #[error("Live network providers are only available on Linux")]
    Unsupported,
}

impl RunError {
    /// Returns true if the error stems from user-supplied configuration
    /// rather than from the host.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Reconcile(e) => e.is_validation(),
            Self::Watch(WatchError::InvalidInterval) => true,
            _ => false,
        }
    }
}

/// Writes one `<name> (MTU=<mtu>, HW=<hw>)` line per interface.
///
/// # Errors
///
/// Returns [`RunError::Fetch`] or [`RunError::Output`].
pub fn list_interfaces<P, W>(lister: &Lister<P>, out: &mut W) -> Result<(), RunError>
where
    P: InterfaceProvider,
    W: Write,
{
    let interfaces = lister.list()?;
    if interfaces.is_empty() {
        writeln!(out, "No interfaces found")?;
        return Ok(());
    }
    for iface in interfaces {
        writeln!(
            out,
            "{} (MTU={}, HW={})",
            iface.name, iface.mtu, iface.hardware_addr
        )?;
    }
    Ok(())
}

/// Writes the addresses of `name`, one per line.
///
/// # Errors
///
/// Returns [`RunError::Fetch`] or [`RunError::Output`].
pub fn show_addresses<P, W>(viewer: &Viewer<P>, name: &str, out: &mut W) -> Result<(), RunError>
where
    P: AddressProvider,
    W: Write,
{
    let addrs = viewer.view(name)?;
    if addrs.is_empty() {
        writeln!(out, "No addresses for {name}")?;
        return Ok(());
    }
    for addr in addrs {
        writeln!(out, "{addr}")?;
    }
    Ok(())
}

/// Reconciles `desired`, or prints the edit script when `dry_run` is set.
///
/// # Errors
///
/// Returns [`RunError::Reconcile`] or [`RunError::Output`].
pub fn apply_desired<P, W>(
    reconciler: &Reconciler<P>,
    desired: &DesiredState,
    dry_run: bool,
    out: &mut W,
) -> Result<(), RunError>
where
    P: NetlinkProvider,
    W: Write,
{
    if dry_run {
        let script = reconciler.plan(desired)?;
        if script.is_empty() {
            writeln!(out, "Nothing to change on {}", desired.interface)?;
        } else {
            writeln!(out, "{script}")?;
        }
        return Ok(());
    }

    let script = reconciler.apply(desired)?;
    tracing::debug!("Applied {} change(s)", script.len());
    writeln!(out, "Configuration applied to {}", desired.interface)?;
    Ok(())
}

/// Runs the watcher until `shutdown` completes.
///
/// # Errors
///
/// Returns [`RunError::Watch`] if the watcher fails.
pub async fn monitor<I, A, W, S>(
    interfaces: I,
    addresses: A,
    out: W,
    settings: &MonitorSettings,
    shutdown: S,
) -> Result<(), RunError>
where
    I: InterfaceProvider,
    A: AddressProvider,
    W: Write,
    S: Future<Output = ()>,
{
    let mut watcher = Watcher::new(interfaces, addresses, out, settings.interval);
    if let Some(name) = &settings.interface {
        watcher = watcher.with_filter(name.clone());
    }
    watcher.run(shutdown).await?;
    tracing::info!("Monitor stopped");
    Ok(())
}

/// Writes the settings template and reports where it went.
///
/// # Errors
///
/// Returns [`RunError::Config`] or [`RunError::Output`].
pub fn init<W: Write>(output: &std::path::Path, out: &mut W) -> Result<(), RunError> {
    write_default_config(output)?;
    writeln!(
        out,
        "Configuration template written to: {}",
        output.display()
    )?;
    Ok(())
}

/// Executes a command against the live platform providers.
///
/// Excluded from coverage - requires platform APIs and signal handling.
#[cfg(not(tarpaulin_include))]
#[cfg(target_os = "linux")]
pub fn execute(command: Command, toml: Option<&TomlConfig>) -> Result<(), RunError> {
    use ifstate::network::platform::PlatformProvider;
    use ifstate::reconcile::platform::RtnetlinkProvider;

    let stdout = io::stdout();
    match command {
        Command::Interfaces => {
            list_interfaces(&Lister::new(PlatformProvider::new()), &mut stdout.lock())
        }
        Command::Addresses { interface } => show_addresses(
            &Viewer::new(PlatformProvider::new()),
            &interface,
            &mut stdout.lock(),
        ),
        Command::ApplyConfig {
            file,
            dry_run,
            prune_families,
        } => {
            let settings = ApplySettings::resolve(&file, dry_run, prune_families, toml);
            tracing::info!("{settings}");
            let desired = load_desired_state(&settings.file)?;
            let reconciler = Reconciler::new(RtnetlinkProvider::new()?)
                .with_prune_absent_families(settings.prune_absent_families);
            apply_desired(&reconciler, &desired, settings.dry_run, &mut stdout.lock())
        }
        Command::Monitor {
            interval,
            interface,
        } => {
            let settings = MonitorSettings::resolve(interval, interface.as_deref(), toml)?;
            tracing::info!("{settings}");
            let runtime = tokio::runtime::Runtime::new().map_err(RunError::Runtime)?;
            let provider = PlatformProvider::new();
            runtime.block_on(monitor(
                provider.clone(),
                provider,
                stdout,
                &settings,
                shutdown_signal(),
            ))
        }
        Command::Init { output } => init(&output, &mut stdout.lock()),
    }
}

/// Non-Linux fallback: only `init` works without live providers.
#[cfg(not(tarpaulin_include))]
#[cfg(not(target_os = "linux"))]
pub fn execute(command: Command, _toml: Option<&TomlConfig>) -> Result<(), RunError> {
    match command {
        Command::Init { output } => init(&output, &mut io::stdout().lock()),
        _ => Err(RunError::Unsupported),
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// A handler that cannot be installed is logged and never fires.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received, stopping...");
}
