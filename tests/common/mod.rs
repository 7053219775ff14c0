// Shared test helpers: a scripted in-memory provider on tokio's (pausable) clock

#![allow(dead_code)]

use async_trait::async_trait;
use nanostat::error::{FetchError, WriteError};
use nanostat::models::*;
use nanostat::provider::Provider;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

pub fn sample_stats(n: u32) -> RealtimeStats {
    RealtimeStats {
        cpu_usage: n as f32,
        cpu_temp: None,
        gpu_usage: (n * 2) as f32,
        gpu_temp: Some(50.0 + n as f32),
        memory_usage: 40.0,
        network_stats: NetworkStats {
            download_rate: 128.0,
            upload_rate: 16.0,
            latency: None,
        },
        timestamp: i64::from(n),
    }
}

pub fn sample_overview() -> HardwareOverview {
    HardwareOverview {
        cpu: CpuInfo {
            name: "Test CPU".into(),
            cores: 4,
            threads: 8,
            frequency: 3600,
            usage: 10.0,
            temperature: None,
            per_core_usage: vec![10.0; 8],
        },
        gpu: None,
        memory: MemoryInfo {
            total: 16384,
            used: 8192,
            available: 8192,
            usage: 50.0,
            memory_type: None,
            frequency: None,
        },
        disks: vec![],
        network: NetworkInfo { interfaces: vec![] },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Settings(MonitorSettings),
    Position(MonitorPosition),
    Show,
    Hide,
}

#[derive(Default)]
struct FakeState {
    settings: MonitorSettings,
    /// Served before falling back to `sample_stats(call_index)`.
    realtime_script: VecDeque<Result<RealtimeStats, FetchError>>,
    realtime_failing: bool,
    overview_failing: bool,
    settings_read_failing: bool,
    write_failure: Option<String>,
    realtime_delay: Duration,
    settings_write_delay: Duration,
    position_write_delay: Duration,
    realtime_calls: Vec<Instant>,
    overview_calls: Vec<Instant>,
    settings_reads: Vec<Instant>,
    writes: Vec<Write>,
    in_flight: u32,
    max_in_flight: u32,
    overlay_visible: bool,
}

#[derive(Default)]
pub struct FakeProvider {
    state: Mutex<FakeState>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: MonitorSettings) -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().settings = settings;
        fake
    }

    pub fn set_stored_settings(&self, settings: MonitorSettings) {
        self.state.lock().unwrap().settings = settings;
    }

    pub fn stored_settings(&self) -> MonitorSettings {
        self.state.lock().unwrap().settings.clone()
    }

    pub fn push_realtime(&self, result: Result<RealtimeStats, FetchError>) {
        self.state.lock().unwrap().realtime_script.push_back(result);
    }

    pub fn set_realtime_failing(&self, failing: bool) {
        self.state.lock().unwrap().realtime_failing = failing;
    }

    pub fn set_overview_failing(&self, failing: bool) {
        self.state.lock().unwrap().overview_failing = failing;
    }

    pub fn set_settings_read_failing(&self, failing: bool) {
        self.state.lock().unwrap().settings_read_failing = failing;
    }

    pub fn set_write_failure(&self, message: Option<&str>) {
        self.state.lock().unwrap().write_failure = message.map(str::to_string);
    }

    pub fn set_realtime_delay(&self, delay: Duration) {
        self.state.lock().unwrap().realtime_delay = delay;
    }

    pub fn set_write_delays(&self, settings: Duration, position: Duration) {
        let mut s = self.state.lock().unwrap();
        s.settings_write_delay = settings;
        s.position_write_delay = position;
    }

    pub fn realtime_calls(&self) -> Vec<Instant> {
        self.state.lock().unwrap().realtime_calls.clone()
    }

    pub fn overview_calls(&self) -> Vec<Instant> {
        self.state.lock().unwrap().overview_calls.clone()
    }

    pub fn settings_reads(&self) -> usize {
        self.state.lock().unwrap().settings_reads.len()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn max_in_flight(&self) -> u32 {
        self.state.lock().unwrap().max_in_flight
    }

    pub fn overlay_visible(&self) -> bool {
        self.state.lock().unwrap().overlay_visible
    }

    fn check_write(&self) -> Result<(), WriteError> {
        match &self.state.lock().unwrap().write_failure {
            Some(msg) => Err(WriteError::WriteRejected(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Provider for FakeProvider {
    async fn get_hardware_overview(&self) -> Result<HardwareOverview, FetchError> {
        let failing = {
            let mut s = self.state.lock().unwrap();
            s.overview_calls.push(Instant::now());
            s.overview_failing
        };
        if failing {
            return Err(FetchError::Unreachable("overview offline".into()));
        }
        Ok(sample_overview())
    }

    async fn get_realtime_stats(&self) -> Result<RealtimeStats, FetchError> {
        let (delay, index) = {
            let mut s = self.state.lock().unwrap();
            s.realtime_calls.push(Instant::now());
            s.in_flight += 1;
            s.max_in_flight = s.max_in_flight.max(s.in_flight);
            (s.realtime_delay, s.realtime_calls.len() as u32)
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let mut s = self.state.lock().unwrap();
        s.in_flight -= 1;
        if let Some(scripted) = s.realtime_script.pop_front() {
            return scripted;
        }
        if s.realtime_failing {
            return Err(FetchError::Unreachable("sensor service down".into()));
        }
        Ok(sample_stats(index))
    }

    async fn get_monitor_settings(&self) -> Result<MonitorSettings, FetchError> {
        let mut s = self.state.lock().unwrap();
        s.settings_reads.push(Instant::now());
        if s.settings_read_failing {
            return Err(FetchError::Timeout);
        }
        Ok(s.settings.clone())
    }

    async fn update_monitor_settings(&self, settings: &MonitorSettings) -> Result<(), WriteError> {
        let delay = self.state.lock().unwrap().settings_write_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.check_write()?;
        let mut s = self.state.lock().unwrap();
        s.settings = settings.clone();
        s.writes.push(Write::Settings(settings.clone()));
        Ok(())
    }

    async fn show_overlay_window(&self) -> Result<(), WriteError> {
        let mut s = self.state.lock().unwrap();
        s.overlay_visible = true;
        s.writes.push(Write::Show);
        Ok(())
    }

    async fn hide_overlay_window(&self) -> Result<(), WriteError> {
        let mut s = self.state.lock().unwrap();
        s.overlay_visible = false;
        s.writes.push(Write::Hide);
        Ok(())
    }

    async fn update_overlay_position(&self, position: MonitorPosition) -> Result<(), WriteError> {
        let delay = self.state.lock().unwrap().position_write_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.check_write()?;
        let mut s = self.state.lock().unwrap();
        s.settings.position = position;
        s.writes.push(Write::Position(position));
        Ok(())
    }
}
