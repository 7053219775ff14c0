// Telemetry and settings models shared by the provider and both surfaces

mod hardware;
mod realtime;
mod settings;

pub use hardware::{CpuInfo, DiskInfo, GpuInfo, HardwareOverview, MemoryInfo, NetworkInfo, NetworkInterface};
pub use realtime::{NetworkStats, RealtimeStats};
pub use settings::{
    DisplayItems, MAX_OPACITY, MIN_OPACITY, MonitorPosition, MonitorSettings,
};
