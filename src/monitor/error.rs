//! Error types for the monitor layer.

use std::io;

use crate::network::FetchError;
use thiserror::Error;

/// Error type for watcher termination.
///
/// A cancelled watcher is not an error; [`super::Watcher::run`] returns
/// `Ok(())` for it. Every variant here is a failure.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Collecting a snapshot failed.
    #[error("Failed to collect interface state: {0}")]
    Collect(#[from] FetchError),

    /// Writing to the output sink failed.
    #[error("Failed to write notification: {0}")]
    Output(#[from] io::Error),

    /// The polling interval was zero.
    #[error("Polling interval must be greater than zero")]
    InvalidInterval,
}
