//! Polling watcher.
//!
//! This module provides [`Watcher`], which collects a [`Snapshot`] every
//! interval and writes a notification line for each detected change.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

use super::change::{diff_addresses, diff_interfaces};
use super::{Snapshot, WatchError, report};
use crate::network::{AddressProvider, InterfaceProvider, Lister, Viewer};
use crate::time::{Clock, SystemClock, rfc3339};

/// Polling-based interface and address watcher.
///
/// # Type Parameters
///
/// * `I` - The [`InterfaceProvider`] listing interfaces
/// * `A` - The [`AddressProvider`] listing per-interface addresses
/// * `W` - The output sink for notification lines
/// * `C` - The [`Clock`] used for timestamps (defaults to [`SystemClock`])
///
/// # Lifecycle
///
/// `run` collects the first snapshot and writes the startup report, then
/// waits on the interval and the shutdown future together. Each tick
/// collects a new snapshot, reports the differences to the previous one,
/// and replaces it. The first tick fires one interval after startup.
pub struct Watcher<I, A, W, C = SystemClock> {
    lister: Lister<I>,
    viewer: Viewer<A>,
    writer: W,
    clock: C,
    interval: Duration,
    filter: Option<String>,
}

impl<I, A, W> Watcher<I, A, W, SystemClock>
where
    I: InterfaceProvider,
    A: AddressProvider,
    W: Write,
{
    /// Creates a watcher over all interfaces using the system clock.
    #[must_use]
    pub const fn new(interfaces: I, addresses: A, writer: W, interval: Duration) -> Self {
        Self {
            lister: Lister::new(interfaces),
            viewer: Viewer::new(addresses),
            writer,
            clock: SystemClock,
            interval,
            filter: None,
        }
    }
}

impl<I, A, W, C> Watcher<I, A, W, C>
where
    I: InterfaceProvider,
    A: AddressProvider,
    W: Write,
    C: Clock,
{
    /// Replaces the clock, allowing a mock clock in tests.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Watcher<I, A, W, C2> {
        Watcher {
            lister: self.lister,
            viewer: self.viewer,
            writer: self.writer,
            clock,
            interval: self.interval,
            filter: self.filter,
        }
    }

    /// Restricts monitoring to a single interface.
    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>) -> Self {
        self.filter = Some(name.into());
        self
    }

    /// Runs until `shutdown` completes or a provider call fails.
    ///
    /// Completion of `shutdown` is the cancellation signal: it is checked
    /// ahead of the timer on every iteration and ends the run with `Ok(())`.
    /// Provider calls are synchronous, so cancellation waits for an
    /// in-flight collection to finish.
    ///
    /// # Errors
    ///
    /// - [`WatchError::InvalidInterval`] for a zero interval
    /// - [`WatchError::Collect`] when the first or any later collection fails
    /// - [`WatchError::Output`] when the writer fails
    pub async fn run<S>(mut self, shutdown: S) -> Result<(), WatchError>
    where
        S: Future<Output = ()>,
    {
        if self.interval.is_zero() {
            return Err(WatchError::InvalidInterval);
        }

        let mut previous = self.collect()?;
        let timestamp = self.timestamp();
        report::write_initial(
            &mut self.writer,
            &timestamp,
            self.interval,
            self.filter.as_deref(),
            &previous,
        )?;
        self.writer.flush()?;

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = IntervalStream::new(ticker);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    tracing::debug!("Cancellation received, watcher stopping");
                    return Ok(());
                }

                Some(_) = ticks.next() => {
                    let current = self.collect()?;
                    self.report(&previous, &current)?;
                    previous = current;
                }
            }
        }
    }

    fn collect(&self) -> Result<Snapshot, WatchError> {
        let snapshot = Snapshot::collect(&self.lister, &self.viewer, self.filter.as_deref())?;
        tracing::debug!("Collected {} interface(s)", snapshot.interfaces().len());
        Ok(snapshot)
    }

    fn report(&mut self, previous: &Snapshot, current: &Snapshot) -> Result<(), WatchError> {
        let interfaces = diff_interfaces(previous.interfaces(), current.interfaces());
        let addresses = diff_addresses(previous.addresses(), current.addresses());
        if interfaces.is_empty() && addresses.is_empty() {
            return Ok(());
        }

        let timestamp = self.timestamp();
        report::write_changes(&mut self.writer, &timestamp, &interfaces, &addresses)?;
        self.writer.flush()?;
        Ok(())
    }

    fn timestamp(&self) -> String {
        rfc3339(self.clock.now())
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
