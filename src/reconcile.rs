// Overlay reconciliation: latest settings + latest (maybe absent) stats -> what to draw.
// An absent value renders as a placeholder; it is never an error.

use std::fmt;

use crate::models::{DisplayItems, MonitorSettings, RealtimeStats};

pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Cpu,
    CpuTemp,
    Gpu,
    GpuTemp,
    Memory,
    Network,
    Fps,
}

impl MetricKind {
    /// Display order.
    pub const ALL: [MetricKind; 7] = [
        MetricKind::Cpu,
        MetricKind::CpuTemp,
        MetricKind::Gpu,
        MetricKind::GpuTemp,
        MetricKind::Memory,
        MetricKind::Network,
        MetricKind::Fps,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPU",
            MetricKind::CpuTemp => "CPU Temp",
            MetricKind::Gpu => "GPU",
            MetricKind::GpuTemp => "GPU Temp",
            MetricKind::Memory => "MEM",
            MetricKind::Network => "NET",
            MetricKind::Fps => "FPS",
        }
    }

    pub fn is_enabled(self, items: &DisplayItems) -> bool {
        match self {
            MetricKind::Cpu => items.cpu,
            MetricKind::CpuTemp => items.cpu_temp,
            MetricKind::Gpu => items.gpu,
            MetricKind::GpuTemp => items.gpu_temp,
            MetricKind::Memory => items.memory,
            MetricKind::Network => items.network,
            MetricKind::Fps => items.fps,
        }
    }

    /// FPS has no source yet and always reads as absent.
    pub fn read(self, stats: &RealtimeStats) -> Option<f64> {
        match self {
            MetricKind::Cpu => Some(f64::from(stats.cpu_usage)),
            MetricKind::CpuTemp => stats.cpu_temp.map(f64::from),
            MetricKind::Gpu => Some(f64::from(stats.gpu_usage)),
            MetricKind::GpuTemp => stats.gpu_temp.map(f64::from),
            MetricKind::Memory => Some(f64::from(stats.memory_usage)),
            MetricKind::Network => Some(stats.network_stats.download_rate),
            MetricKind::Fps => None,
        }
    }

    fn format(self, value: f64) -> String {
        match self {
            MetricKind::Cpu | MetricKind::Gpu | MetricKind::Memory => format!("{:.0}%", value),
            MetricKind::CpuTemp | MetricKind::GpuTemp => format!("{:.0}°C", value),
            MetricKind::Network => format!("↓{:.0}KB/s", value),
            MetricKind::Fps => format!("{:.0}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricReading {
    pub kind: MetricKind,
    pub value: Option<f64>,
    /// Formatted value, or `PLACEHOLDER`.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub visible: bool,
    pub layout: Layout,
    /// Render alpha, opacity / 100.
    pub alpha: f64,
    pub metrics: Vec<MetricReading>,
}

pub fn reconcile(settings: &MonitorSettings, stats: Option<&RealtimeStats>) -> OverlayView {
    let metrics = MetricKind::ALL
        .into_iter()
        .filter(|k| k.is_enabled(&settings.display_items))
        .map(|kind| {
            let value = stats.and_then(|s| kind.read(s));
            MetricReading {
                kind,
                value,
                text: value.map_or_else(|| PLACEHOLDER.to_string(), |v| kind.format(v)),
            }
        })
        .collect();
    OverlayView {
        visible: settings.enabled,
        layout: if settings.position.is_vertical() {
            Layout::Vertical
        } else {
            Layout::Horizontal
        },
        alpha: settings.alpha(),
        metrics,
    }
}

impl fmt::Display for OverlayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = match self.layout {
            Layout::Horizontal => "  ",
            Layout::Vertical => "\n",
        };
        for (i, m) in self.metrics.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{} {}", m.kind.label(), m.text)?;
        }
        Ok(())
    }
}
