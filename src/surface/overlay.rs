// Overlay-surface scheduler: a fixed settings poll plus a stats poll at the
// currently observed refresh_interval. Each poll runs on its own task.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::Instrument;

use super::{Mount, Surface, joined};
use crate::error::{FetchError, SnapshotKind};
use crate::fetcher::TelemetryFetcher;
use crate::models::{MonitorSettings, RealtimeStats};
use crate::reconcile::{OverlayView, reconcile};
use crate::store::SettingsStore;

/// The overlay has no push channel; this bounds how stale its settings can be.
pub const DEFAULT_SETTINGS_POLL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub settings_poll: Duration,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            settings_poll: DEFAULT_SETTINGS_POLL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverlayState {
    pub settings: MonitorSettings,
    /// None until the first successful fetch.
    pub stats: Option<RealtimeStats>,
    /// Period the stats timer is currently scheduled at.
    pub stats_period: Duration,
    /// Non-fatal status from the latest failed fetch; cleared on success.
    pub status: Option<String>,
    pub reschedules: u32,
}

impl Default for OverlayState {
    fn default() -> Self {
        let settings = MonitorSettings::default();
        Self {
            stats_period: settings.refresh_period(),
            settings,
            stats: None,
            status: None,
            reschedules: 0,
        }
    }
}

impl OverlayState {
    pub fn view(&self) -> OverlayView {
        reconcile(&self.settings, self.stats.as_ref())
    }
}

pub fn mount(
    store: Arc<SettingsStore>,
    fetcher: Arc<TelemetryFetcher>,
    config: OverlayConfig,
) -> Surface<OverlayState> {
    let span = tracing::debug_span!(
        "overlay",
        settings_poll_ms = config.settings_poll.as_millis() as u64
    );
    Surface::spawn("overlay", OverlayState::default(), move |m| {
        run(m, store, fetcher, config).instrument(span)
    })
}

fn stats_timer(period: Duration) -> Interval {
    // First tick is immediate: a (re)scheduled stream fetches right away.
    let mut tick = interval(period);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tick
}

async fn run(
    mut m: Mount<OverlayState>,
    store: Arc<SettingsStore>,
    fetcher: Arc<TelemetryFetcher>,
    config: OverlayConfig,
) {
    let initial = store.load().await;
    let mut period = initial.refresh_period();
    if !m.publish(|s| {
        s.settings = initial;
        s.stats_period = period;
    }) {
        return;
    }

    let mut settings_tick = interval_at(Instant::now() + config.settings_poll, config.settings_poll);
    settings_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stats_tick = stats_timer(period);
    // One pending call per stream; the streams never wait on each other.
    let mut polls: JoinSet<Result<MonitorSettings, FetchError>> = JoinSet::new();
    let mut fetches: JoinSet<Result<RealtimeStats, FetchError>> = JoinSet::new();

    loop {
        let applied = tokio::select! {
            biased;
            _ = &mut m.shutdown_rx => {
                tracing::debug!("overlay unmounted");
                break;
            }
            Some(done) = polls.join_next(), if !polls.is_empty() => {
                let settings = match joined(SnapshotKind::Settings, done) {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            operation = "poll_settings",
                            "settings poll failed; keeping last observed settings"
                        );
                        if !m.is_alive() {
                            break;
                        }
                        continue;
                    }
                };
                let observed = settings.refresh_period();
                let rescheduled = observed != period;
                let applied = m.publish(|s| {
                    s.settings = settings;
                    if rescheduled {
                        s.stats_period = observed;
                        s.reschedules += 1;
                    }
                });
                if applied && rescheduled {
                    tracing::info!(
                        from_ms = period.as_millis() as u64,
                        to_ms = observed.as_millis() as u64,
                        "refresh interval changed; rescheduling stats poll"
                    );
                    period = observed;
                    stats_tick = stats_timer(period);
                }
                applied
            }
            Some(done) = fetches.join_next(), if !fetches.is_empty() => {
                match joined(SnapshotKind::Realtime, done) {
                    Ok(stats) => m.publish(|s| {
                        s.stats = Some(stats);
                        s.status = None;
                    }),
                    Err(FetchError::InFlight(_)) => m.is_alive(),
                    Err(e) => m.publish(|s| s.status = Some(e.to_string())),
                }
            }
            _ = settings_tick.tick() => {
                if polls.is_empty() {
                    let store = store.clone();
                    polls.spawn(async move { store.poll().await }.in_current_span());
                }
                true
            }
            _ = stats_tick.tick() => {
                if fetches.is_empty() {
                    let fetcher = fetcher.clone();
                    fetches.spawn(async move { fetcher.fetch_realtime().await }.in_current_span());
                } else {
                    tracing::debug!(kind = "realtime", "previous fetch pending; skipping tick");
                }
                true
            }
        };
        if !applied {
            break;
        }
    }
    // In-flight calls run to completion; nobody reads their results.
    polls.detach_all();
    fetches.detach_all();
}
