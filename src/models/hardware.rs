// Heavy hardware overview snapshot (dashboard only)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareOverview {
    pub cpu: CpuInfo,
    pub gpu: Option<GpuInfo>,
    pub memory: MemoryInfo,
    /// Ordered as reported by the host.
    pub disks: Vec<DiskInfo>,
    pub network: NetworkInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub name: String,
    pub cores: u32,
    pub threads: u32,
    /// Average across logical CPUs, MHz.
    pub frequency: u64,
    pub usage: f32,
    pub temperature: Option<f32>,
    pub per_core_usage: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuInfo {
    pub name: String,
    pub brand: String,
    /// MB
    pub vram_total: u64,
    /// MB
    pub vram_used: u64,
    pub usage: f32,
    pub temperature: Option<f32>,
    /// Watts
    pub power_usage: Option<f32>,
    pub core_clock: Option<u32>,
    pub memory_clock: Option<u32>,
    pub pcie_info: Option<String>,
    pub driver_version: Option<String>,
}

/// Memory figures in MB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub usage: f32,
    pub memory_type: Option<String>,
    pub frequency: Option<u32>,
}

/// Disk figures in GB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub name: String,
    pub mount_point: String,
    pub disk_type: String,
    pub total: f64,
    pub used: f64,
    pub available: f64,
    pub usage: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub interfaces: Vec<NetworkInterface>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    /// bytes/s since the previous sample
    pub rx_rate: f64,
    /// bytes/s since the previous sample
    pub tx_rate: f64,
}
