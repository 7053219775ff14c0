// Main-surface scheduler: independent overview and realtime streams on a fixed cadence,
// with CPU/GPU history

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{MissedTickBehavior, interval};
use tracing::Instrument;

use super::{Mount, Surface, joined};
use crate::error::{FetchError, SnapshotKind};
use crate::fetcher::TelemetryFetcher;
use crate::history::HistoryBuffer;
use crate::models::{HardwareOverview, RealtimeStats};

/// Fixed main-surface cadence. Independent of `MonitorSettings::refresh_interval`,
/// which only drives the overlay.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub refresh_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub overview: Option<HardwareOverview>,
    pub realtime: Option<RealtimeStats>,
    pub cpu_history: HistoryBuffer,
    pub gpu_history: HistoryBuffer,
    /// True until both kinds have resolved at least once.
    pub loading: bool,
    /// Non-fatal status combining the latest outcome of each kind.
    pub error: Option<String>,
    pub overview_error: Option<String>,
    pub realtime_error: Option<String>,
    /// Resolved fetches per kind, successful or not.
    pub overview_updates: u64,
    pub realtime_updates: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            overview: None,
            realtime: None,
            cpu_history: HistoryBuffer::new(),
            gpu_history: HistoryBuffer::new(),
            loading: true,
            error: None,
            overview_error: None,
            realtime_error: None,
            overview_updates: 0,
            realtime_updates: 0,
        }
    }
}

impl DashboardState {
    /// A failed fetch leaves the previous snapshot in place.
    fn apply_overview(&mut self, result: Result<HardwareOverview, FetchError>) {
        match result {
            Ok(o) => {
                self.overview = Some(o);
                self.overview_error = None;
            }
            Err(FetchError::InFlight(_)) => return,
            Err(e) => self.overview_error = Some(format!("overview: {}", e)),
        }
        self.overview_updates += 1;
        self.settle();
    }

    fn apply_realtime(&mut self, result: Result<RealtimeStats, FetchError>) {
        match result {
            Ok(r) => {
                self.cpu_history.push(r.cpu_usage);
                self.gpu_history.push(r.gpu_usage);
                self.realtime = Some(r);
                self.realtime_error = None;
            }
            Err(FetchError::InFlight(_)) => return,
            Err(e) => self.realtime_error = Some(format!("realtime: {}", e)),
        }
        self.realtime_updates += 1;
        self.settle();
    }

    fn settle(&mut self) {
        let errors: Vec<&str> = [&self.overview_error, &self.realtime_error]
            .into_iter()
            .filter_map(|e| e.as_deref())
            .collect();
        self.error = if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        };
        self.loading = self.overview_updates == 0 || self.realtime_updates == 0;
    }
}

/// Fetches immediately, then every `refresh_interval` until unmounted. Overview and
/// realtime run as separate streams: each tick starts whichever kind is idle, so a slow
/// call on one kind neither queues requests nor delays the other.
pub fn mount(fetcher: Arc<TelemetryFetcher>, config: DashboardConfig) -> Surface<DashboardState> {
    let span = tracing::debug_span!(
        "dashboard",
        refresh_interval_ms = config.refresh_interval.as_millis() as u64
    );
    Surface::spawn("dashboard", DashboardState::default(), move |m| {
        run(m, fetcher, config).instrument(span)
    })
}

struct Streams {
    fetcher: Arc<TelemetryFetcher>,
    overview: JoinSet<Result<HardwareOverview, FetchError>>,
    realtime: JoinSet<Result<RealtimeStats, FetchError>>,
}

impl Streams {
    fn start_idle(&mut self) {
        if self.overview.is_empty() {
            let fetcher = self.fetcher.clone();
            self.overview
                .spawn(async move { fetcher.fetch_overview().await }.in_current_span());
        } else {
            tracing::debug!(kind = "overview", "previous fetch pending; skipping tick");
        }
        if self.realtime.is_empty() {
            let fetcher = self.fetcher.clone();
            self.realtime
                .spawn(async move { fetcher.fetch_realtime().await }.in_current_span());
        } else {
            tracing::debug!(kind = "realtime", "previous fetch pending; skipping tick");
        }
    }
}

async fn run(mut m: Mount<DashboardState>, fetcher: Arc<TelemetryFetcher>, config: DashboardConfig) {
    let mut tick = interval(config.refresh_interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut streams = Streams {
        fetcher,
        overview: JoinSet::new(),
        realtime: JoinSet::new(),
    };

    loop {
        let applied = tokio::select! {
            biased;
            _ = &mut m.shutdown_rx => {
                tracing::debug!("dashboard unmounted");
                break;
            }
            Some(done) = streams.overview.join_next(), if !streams.overview.is_empty() => {
                let result = joined(SnapshotKind::Overview, done);
                m.publish(|s| s.apply_overview(result))
            }
            Some(done) = streams.realtime.join_next(), if !streams.realtime.is_empty() => {
                let result = joined(SnapshotKind::Realtime, done);
                m.publish(|s| s.apply_realtime(result))
            }
            _ = tick.tick() => {
                streams.start_idle();
                true
            }
            Some(()) = m.refresh_rx.recv() => {
                tick.reset();
                streams.start_idle();
                true
            }
        };
        if !applied {
            break;
        }
    }
    // In-flight fetches run to completion; nobody reads their results.
    streams.overview.detach_all();
    streams.realtime.detach_all();
}
