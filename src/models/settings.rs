// Monitor settings: the one value both surfaces share, only through the provider

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::WriteError;

pub const MIN_OPACITY: u8 = 20;
pub const MAX_OPACITY: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSettings {
    pub enabled: bool,
    pub position: MonitorPosition,
    pub display_items: DisplayItems,
    /// Overlay stats-poll period, ms.
    pub refresh_interval: u32,
    /// 20..=100
    pub opacity: u8,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            position: MonitorPosition::default(),
            display_items: DisplayItems::default(),
            refresh_interval: 1000,
            opacity: 80,
        }
    }
}

impl MonitorSettings {
    /// Render alpha in [0.20, 1.00].
    pub fn alpha(&self) -> f64 {
        f64::from(self.opacity) / 100.0
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.refresh_interval.max(1)))
    }

    pub fn validate(&self) -> Result<(), WriteError> {
        if self.refresh_interval == 0 {
            return Err(WriteError::Invalid(
                "refresh_interval must be > 0".into(),
            ));
        }
        if !(MIN_OPACITY..=MAX_OPACITY).contains(&self.opacity) {
            return Err(WriteError::Invalid(format!(
                "opacity must be between {} and {}, got {}",
                MIN_OPACITY, MAX_OPACITY, self.opacity
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonitorPosition {
    #[default]
    TopCenter,
    BottomCenter,
    LeftCenter,
    RightCenter,
}

impl MonitorPosition {
    pub const ALL: [MonitorPosition; 4] = [
        MonitorPosition::TopCenter,
        MonitorPosition::BottomCenter,
        MonitorPosition::LeftCenter,
        MonitorPosition::RightCenter,
    ];

    /// Side-docked panels stack their items vertically.
    pub fn is_vertical(self) -> bool {
        matches!(self, MonitorPosition::LeftCenter | MonitorPosition::RightCenter)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MonitorPosition::TopCenter => "TopCenter",
            MonitorPosition::BottomCenter => "BottomCenter",
            MonitorPosition::LeftCenter => "LeftCenter",
            MonitorPosition::RightCenter => "RightCenter",
        }
    }
}

impl fmt::Display for MonitorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonitorPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace(['-', '_'], "").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown position '{}', expected one of TopCenter, BottomCenter, LeftCenter, RightCenter",
                    s
                )
            })
    }
}

/// Named on/off flags for the overlay items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItems {
    pub cpu: bool,
    #[serde(default)]
    pub cpu_temp: bool,
    pub gpu: bool,
    pub gpu_temp: bool,
    pub memory: bool,
    pub network: bool,
    pub fps: bool,
}

impl Default for DisplayItems {
    fn default() -> Self {
        Self {
            cpu: true,
            cpu_temp: false,
            gpu: true,
            gpu_temp: true,
            memory: true,
            network: true,
            fps: false,
        }
    }
}
