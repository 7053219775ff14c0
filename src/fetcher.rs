// Telemetry fetcher: one provider round trip per call, at most one in flight per kind

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::{FetchError, SnapshotKind};
use crate::models::{HardwareOverview, RealtimeStats};
use crate::provider::Provider;

pub struct TelemetryFetcher {
    provider: Arc<dyn Provider>,
    overview_gate: Mutex<()>,
    realtime_gate: Mutex<()>,
}

impl TelemetryFetcher {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            overview_gate: Mutex::new(()),
            realtime_gate: Mutex::new(()),
        }
    }

    /// Refuses with `FetchError::InFlight` while a previous overview fetch is unresolved.
    pub async fn fetch_overview(&self) -> Result<HardwareOverview, FetchError> {
        let Ok(_permit) = self.overview_gate.try_lock() else {
            return Err(FetchError::InFlight(SnapshotKind::Overview));
        };
        let started = Instant::now();
        let result = self.provider.get_hardware_overview().await;
        log_outcome(SnapshotKind::Overview, started, result.as_ref().err());
        result
    }

    /// Refuses with `FetchError::InFlight` while a previous realtime fetch is unresolved.
    pub async fn fetch_realtime(&self) -> Result<RealtimeStats, FetchError> {
        let Ok(_permit) = self.realtime_gate.try_lock() else {
            return Err(FetchError::InFlight(SnapshotKind::Realtime));
        };
        let started = Instant::now();
        let result = self.provider.get_realtime_stats().await;
        log_outcome(SnapshotKind::Realtime, started, result.as_ref().err());
        result
    }
}

fn log_outcome(kind: SnapshotKind, started: Instant, error: Option<&FetchError>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match error {
        None => tracing::debug!(kind = %kind, elapsed_ms, "fetch ok"),
        Some(e) => tracing::warn!(
            error = %e,
            kind = %kind,
            elapsed_ms,
            operation = "fetch",
            "fetch failed; keeping last good snapshot"
        ),
    }
}
