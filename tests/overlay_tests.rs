// Overlay scheduler tests on a paused clock

mod common;

use common::FakeProvider;
use nanostat::fetcher::TelemetryFetcher;
use nanostat::models::{MonitorPosition, MonitorSettings};
use nanostat::reconcile::{Layout, PLACEHOLDER};
use nanostat::store::SettingsStore;
use nanostat::surface::Surface;
use nanostat::surface::overlay::{self, OverlayConfig, OverlayState};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep};

fn mount(fake: &Arc<FakeProvider>) -> Surface<OverlayState> {
    let store = Arc::new(SettingsStore::new(fake.clone()));
    let fetcher = Arc::new(TelemetryFetcher::new(fake.clone()));
    overlay::mount(store, fetcher, OverlayConfig::default())
}

fn offsets_ms(calls: &[Instant], start: Instant) -> Vec<u128> {
    calls.iter().map(|t| (*t - start).as_millis()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_failure_before_any_success_renders_placeholders() {
    let fake = Arc::new(FakeProvider::new());
    fake.set_realtime_failing(true);
    let surface = mount(&fake);
    sleep(Duration::from_millis(10)).await;

    let state = surface.snapshot();
    assert!(state.stats.is_none());
    assert!(state.status.is_some());
    let view = state.view();
    assert_eq!(view.metrics.len(), 5);
    assert!(view.metrics.iter().all(|m| m.text == PLACEHOLDER));
    surface.unmount().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_failure_after_successes_keeps_last_values() {
    let fake = Arc::new(FakeProvider::new());
    let surface = mount(&fake);
    sleep(Duration::from_millis(2500)).await;
    assert_eq!(fake.realtime_calls().len(), 3);

    fake.set_realtime_failing(true);
    sleep(Duration::from_millis(2000)).await;

    let state = surface.snapshot();
    assert_eq!(state.stats.as_ref().map(|s| s.cpu_usage), Some(3.0));
    assert!(state.status.is_some());
    let texts: Vec<String> = state.view().metrics.into_iter().map(|m| m.text).collect();
    assert_eq!(texts, vec!["3%", "6%", "53°C", "40%", "↓128KB/s"]);

    fake.set_realtime_failing(false);
    sleep(Duration::from_millis(1000)).await;
    assert!(surface.snapshot().status.is_none());
    surface.unmount().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_refresh_interval_change_reschedules_within_one_poll() {
    let fake = Arc::new(FakeProvider::new());
    let start = Instant::now();
    let surface = mount(&fake);
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(surface.snapshot().stats_period, Duration::from_millis(1000));

    // The main surface commits a faster interval through its own store.
    let main_store = SettingsStore::new(fake.clone());
    main_store
        .save(MonitorSettings {
            refresh_interval: 500,
            ..MonitorSettings::default()
        })
        .await
        .unwrap();

    sleep(Duration::from_millis(600)).await;
    let state = surface.snapshot();
    assert_eq!(state.stats_period, Duration::from_millis(500));
    assert_eq!(state.reschedules, 1);
    assert_eq!(state.settings.refresh_interval, 500);

    sleep(Duration::from_millis(1500)).await;
    let calls = offsets_ms(&fake.realtime_calls(), start);
    assert_eq!(&calls[..3], &[0, 1000, 2000]);
    let after: Vec<u128> = calls.into_iter().filter(|t| *t > 2000).collect();
    assert_eq!(after, vec![2500, 3000, 3500]);
    surface.unmount().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_settings_changes_reach_the_view() {
    let fake = Arc::new(FakeProvider::new());
    let surface = mount(&fake);
    sleep(Duration::from_millis(10)).await;
    let view = surface.snapshot().view();
    assert!(!view.visible);
    assert_eq!(view.layout, Layout::Horizontal);

    fake.set_stored_settings(MonitorSettings {
        enabled: true,
        position: MonitorPosition::RightCenter,
        opacity: 20,
        ..MonitorSettings::default()
    });
    sleep(Duration::from_millis(1000)).await;

    let state = surface.snapshot();
    assert_eq!(state.reschedules, 0);
    let view = state.view();
    assert!(view.visible);
    assert_eq!(view.layout, Layout::Vertical);
    assert_eq!(view.alpha, 0.20);
    surface.unmount().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_unreadable_settings_fall_back_to_default_then_recover() {
    let fake = Arc::new(FakeProvider::with_settings(MonitorSettings {
        opacity: 60,
        ..MonitorSettings::default()
    }));
    fake.set_settings_read_failing(true);
    let surface = mount(&fake);
    sleep(Duration::from_millis(1500)).await;

    let state = surface.snapshot();
    assert_eq!(state.settings, MonitorSettings::default());
    assert!(state.stats.is_some());

    fake.set_settings_read_failing(false);
    sleep(Duration::from_millis(1000)).await;
    assert_eq!(surface.snapshot().settings.opacity, 60);
    surface.unmount().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_unmount_stops_every_poll() {
    let fake = Arc::new(FakeProvider::new());
    let surface = mount(&fake);
    sleep(Duration::from_millis(2500)).await;
    surface.unmount().await.unwrap();

    let stats_before = fake.realtime_calls().len();
    let settings_before = fake.settings_reads();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(fake.realtime_calls().len(), stats_before);
    assert_eq!(fake.settings_reads(), settings_before);
}

#[tokio::test(start_paused = true)]
async fn test_stats_landing_after_unmount_are_discarded() {
    let fake = Arc::new(FakeProvider::new());
    fake.set_realtime_delay(Duration::from_millis(800));
    let surface = mount(&fake);
    let state = surface.state();

    sleep(Duration::from_millis(100)).await;
    surface.unmount().await.unwrap();
    sleep(Duration::from_millis(1000)).await;
    assert!(state.borrow().stats.is_none());
    assert_eq!(fake.realtime_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_stats_fetch_does_not_delay_settings_poll() {
    let fake = Arc::new(FakeProvider::new());
    fake.set_realtime_delay(Duration::from_millis(1800));
    let surface = mount(&fake);
    let mut state = surface.state();
    sleep(Duration::from_millis(1010)).await;
    assert_eq!(fake.settings_reads(), 2);

    let main_store = SettingsStore::new(fake.clone());
    main_store
        .save(MonitorSettings {
            refresh_interval: 500,
            ..MonitorSettings::default()
        })
        .await
        .unwrap();
    let committed = Instant::now();

    state
        .wait_for(|s| s.stats_period == Duration::from_millis(500))
        .await
        .unwrap();
    assert!(committed.elapsed() <= Duration::from_millis(1000));
    assert_eq!(surface.snapshot().reschedules, 1);
    assert_eq!(fake.max_in_flight(), 1);
    surface.unmount().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_settings_poll_keeps_cadence_while_stats_pending() {
    let fake = Arc::new(FakeProvider::new());
    fake.set_realtime_delay(Duration::from_secs(5));
    let surface = mount(&fake);
    sleep(Duration::from_millis(4500)).await;

    // Startup load plus polls at 1s, 2s, 3s, 4s.
    assert_eq!(fake.settings_reads(), 5);
    assert_eq!(fake.realtime_calls().len(), 1);
    assert!(surface.snapshot().stats.is_none());
    surface.unmount().await.unwrap();
}
