// Error taxonomy for provider reads and writes

use std::fmt;
use thiserror::Error;

/// Which snapshot a fetch was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    Overview,
    Realtime,
    Settings,
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SnapshotKind::Overview => "overview",
            SnapshotKind::Realtime => "realtime",
            SnapshotKind::Settings => "settings",
        })
    }
}

/// A read from the provider failed. Callers keep their last good snapshot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider timed out")]
    Timeout,

    #[error("malformed payload: {0}")]
    Deserialize(String),

    /// A fetch of the same kind has not resolved yet.
    #[error("{0} fetch already in flight")]
    InFlight(SnapshotKind),
}

/// A write to the provider failed. Never swallowed: the caller decides.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WriteError {
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider timed out")]
    Timeout,

    #[error("write rejected: {0}")]
    WriteRejected(String),

    #[error("invalid settings: {0}")]
    Invalid(String),
}
