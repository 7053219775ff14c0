// Lightweight realtime snapshot polled by both surfaces

use serde::{Deserialize, Serialize};

/// Immutable point-in-time sample. A successful fetch replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeStats {
    pub cpu_usage: f32,
    #[serde(default)]
    pub cpu_temp: Option<f32>,
    pub gpu_usage: f32,
    /// Absent on hosts without a readable GPU sensor.
    pub gpu_temp: Option<f32>,
    pub memory_usage: f32,
    pub network_stats: NetworkStats,
    /// Unix millis at sampling time.
    pub timestamp: i64,
}

/// Aggregate throughput across interfaces, KB/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub download_rate: f64,
    pub upload_rate: f64,
    pub latency: Option<f64>,
}
