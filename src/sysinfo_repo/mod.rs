// Host sampling via sysinfo, backing the in-process provider

mod linux;

use crate::models::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use sysinfo::{Components, DiskKind, Disks, Networks, System};
use tracing::instrument;

const BYTES_PER_MB: u64 = 1024 * 1024;
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Cumulative per-interface (rx, tx) byte counters from the previous sample.
struct NetworkSample {
    at: Instant,
    totals: HashMap<String, (u64, u64)>,
}

pub struct SysinfoRepo {
    sys: Arc<Mutex<System>>,
    disks: Arc<Mutex<Disks>>,
    networks: Arc<Mutex<Networks>>,
    components: Arc<Mutex<Components>>,
    last_network: Arc<Mutex<Option<NetworkSample>>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Arc::new(Mutex::new(sys)),
            disks: Arc::new(Mutex::new(Disks::new_with_refreshed_list())),
            networks: Arc::new(Mutex::new(Networks::new_with_refreshed_list())),
            components: Arc::new(Mutex::new(Components::new_with_refreshed_list())),
            last_network: Arc::new(Mutex::new(None)),
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_hardware_overview"))]
    pub async fn get_hardware_overview(&self) -> anyhow::Result<HardwareOverview> {
        let sys = self.sys.clone();
        let disks = self.disks.clone();
        let networks = self.networks.clone();
        let components = self.components.clone();
        let last_network = self.last_network.clone();
        tokio::task::spawn_blocking(move || {
            let cpu_temp = read_cpu_temperature(&components);
            let (cpu, memory) = {
                let mut sys = sys
                    .lock()
                    .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
                sys.refresh_cpu_all();
                sys.refresh_memory();
                (cpu_info(&sys, cpu_temp), memory_info(&sys))
            };

            let disks = {
                let mut guard = disks
                    .lock()
                    .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
                guard.refresh(true);
                guard.list().iter().map(disk_info).collect()
            };

            let interfaces = sample_interfaces(&networks, &last_network)?;

            Ok(HardwareOverview {
                cpu,
                gpu: gpu_info(),
                memory,
                disks,
                network: NetworkInfo { interfaces },
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_realtime_stats"))]
    pub async fn get_realtime_stats(&self) -> anyhow::Result<RealtimeStats> {
        let sys = self.sys.clone();
        let networks = self.networks.clone();
        let components = self.components.clone();
        let last_network = self.last_network.clone();
        tokio::task::spawn_blocking(move || {
            let (cpu_usage, memory_usage) = {
                let mut sys = sys
                    .lock()
                    .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
                sys.refresh_cpu_all();
                sys.refresh_memory();
                (
                    sys.global_cpu_usage().clamp(0.0, 100.0),
                    percent(sys.used_memory(), sys.total_memory()),
                )
            };

            let interfaces = sample_interfaces(&networks, &last_network)?;
            let (rx, tx) = interfaces
                .iter()
                .fold((0.0, 0.0), |(rx, tx), i| (rx + i.rx_rate, tx + i.tx_rate));

            let gpu = linux::read_drm_gpu();
            Ok(RealtimeStats {
                cpu_usage,
                cpu_temp: read_cpu_temperature(&components),
                gpu_usage: gpu.as_ref().and_then(|g| g.busy_percent).unwrap_or(0.0),
                gpu_temp: gpu.and_then(|g| g.temperature),
                memory_usage,
                network_stats: NetworkStats {
                    download_rate: rx / 1024.0,
                    upload_rate: tx / 1024.0,
                    latency: None,
                },
                timestamp: chrono::Utc::now().timestamp_millis(),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}

fn percent(used: u64, total: u64) -> f32 {
    if total > 0 {
        (used as f64 / total as f64 * 100.0) as f32
    } else {
        0.0
    }
}

fn cpu_info(sys: &System, temperature: Option<f32>) -> CpuInfo {
    let cpus = sys.cpus();
    let name = linux::read_cpu_model_linux()
        .or_else(|| {
            cpus.first()
                .map(|c| c.brand().trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| "Unknown CPU".into());
    let frequency = if cpus.is_empty() {
        0
    } else {
        cpus.iter().map(|c| c.frequency()).sum::<u64>() / cpus.len() as u64
    };
    let threads = cpus.len() as u32;
    CpuInfo {
        name,
        cores: System::physical_core_count().map_or(threads, |n| n as u32),
        threads,
        frequency,
        usage: sys.global_cpu_usage().clamp(0.0, 100.0),
        temperature,
        per_core_usage: cpus.iter().map(|c| c.cpu_usage()).collect(),
    }
}

fn memory_info(sys: &System) -> MemoryInfo {
    let total = sys.total_memory();
    let used = sys.used_memory();
    MemoryInfo {
        total: total / BYTES_PER_MB,
        used: used / BYTES_PER_MB,
        available: sys.available_memory() / BYTES_PER_MB,
        usage: percent(used, total),
        memory_type: None,
        frequency: None,
    }
}

fn disk_info(disk: &sysinfo::Disk) -> DiskInfo {
    let total = disk.total_space();
    let available = disk.available_space();
    let used = total.saturating_sub(available);
    let disk_type = if disk.is_removable() {
        "Removable"
    } else {
        match disk.kind() {
            DiskKind::SSD => "SSD",
            DiskKind::HDD => "HDD",
            _ => "Unknown",
        }
    };
    DiskInfo {
        name: disk.name().to_string_lossy().into_owned(),
        mount_point: disk.mount_point().to_string_lossy().into_owned(),
        disk_type: disk_type.into(),
        total: total as f64 / BYTES_PER_GB,
        used: used as f64 / BYTES_PER_GB,
        available: available as f64 / BYTES_PER_GB,
        usage: percent(used, total),
    }
}

fn gpu_info() -> Option<GpuInfo> {
    let gpu = linux::read_drm_gpu()?;
    Some(GpuInfo {
        name: format!("{} GPU ({})", gpu.brand, gpu.card),
        brand: gpu.brand.into(),
        vram_total: gpu.vram_total.unwrap_or(0) / BYTES_PER_MB,
        vram_used: gpu.vram_used.unwrap_or(0) / BYTES_PER_MB,
        usage: gpu.busy_percent.unwrap_or(0.0),
        temperature: gpu.temperature,
        power_usage: None,
        core_clock: None,
        memory_clock: None,
        pcie_info: None,
        driver_version: gpu.driver,
    })
}

fn read_cpu_temperature(components: &Mutex<Components>) -> Option<f32> {
    let mut guard = components.lock().ok()?;
    guard.refresh(false);
    guard
        .list()
        .iter()
        .filter(|c| {
            let label = c.label().to_ascii_lowercase();
            ["cpu", "package", "tctl", "coretemp", "k10temp"]
                .iter()
                .any(|k| label.contains(k))
        })
        .find_map(|c| c.temperature())
}

/// Refreshes interface counters and derives per-second rates from the previous sample.
fn sample_interfaces(
    networks: &Mutex<Networks>,
    last_network: &Mutex<Option<NetworkSample>>,
) -> anyhow::Result<Vec<NetworkInterface>> {
    let mut networks = networks
        .lock()
        .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
    networks.refresh(true);
    let now = Instant::now();
    let mut last = last_network
        .lock()
        .map_err(|e| anyhow::anyhow!("network sample lock poisoned: {}", e))?;

    let mut interfaces: Vec<NetworkInterface> = networks
        .list()
        .iter()
        .map(|(name, data)| {
            let rx_bytes = data.total_received();
            let tx_bytes = data.total_transmitted();
            let (rx_rate, tx_rate) = match last.as_ref() {
                Some(prev) => {
                    let dt = now.duration_since(prev.at).as_secs_f64();
                    match prev.totals.get(name) {
                        Some(&(prx, ptx)) if dt > 0.0 => (
                            rx_bytes.saturating_sub(prx) as f64 / dt,
                            tx_bytes.saturating_sub(ptx) as f64 / dt,
                        ),
                        _ => (0.0, 0.0),
                    }
                }
                None => (0.0, 0.0),
            };
            NetworkInterface {
                name: name.clone(),
                rx_bytes,
                tx_bytes,
                rx_rate,
                tx_rate,
            }
        })
        .collect();
    interfaces.sort_by(|a, b| a.name.cmp(&b.name));

    *last = Some(NetworkSample {
        at: now,
        totals: interfaces
            .iter()
            .map(|i| (i.name.clone(), (i.rx_bytes, i.tx_bytes)))
            .collect(),
    });
    Ok(interfaces)
}
