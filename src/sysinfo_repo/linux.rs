// Linux-specific helpers: /proc and sysfs DRM (sysinfo has no GPU support).

/// Read first "model name" from /proc/cpuinfo (Linux). Prefer over sysinfo when it returns "cpu0" etc.
pub(super) fn read_cpu_model_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("model name") {
                let name = line
                    .find(": ")
                    .map(|i| line[i + 2..].trim())
                    .filter(|s| !s.is_empty() && *s != "cpu0")?;
                return Some(name.to_string());
            }
        }
    }
    None
}

/// First DRM card that exposes a PCI vendor id.
#[derive(Debug, Clone)]
pub(super) struct DrmGpu {
    pub card: String,
    pub brand: &'static str,
    pub busy_percent: Option<f32>,
    /// bytes
    pub vram_total: Option<u64>,
    /// bytes
    pub vram_used: Option<u64>,
    pub temperature: Option<f32>,
    pub driver: Option<String>,
}

pub(super) fn read_drm_gpu() -> Option<DrmGpu> {
    #[cfg(target_os = "linux")]
    {
        let mut cards: Vec<String> = std::fs::read_dir("/sys/class/drm")
            .ok()?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with("card") && !n.contains('-'))
            .collect();
        cards.sort();
        for card in cards {
            let device = std::path::PathBuf::from("/sys/class/drm").join(&card).join("device");
            let Some(vendor) = read_trimmed(&device.join("vendor")) else {
                continue;
            };
            let brand = match vendor.as_str() {
                "0x10de" => "NVIDIA",
                "0x1002" => "AMD",
                "0x8086" => "Intel",
                _ => "Unknown",
            };
            let driver = std::fs::read_link(device.join("driver"))
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));
            return Some(DrmGpu {
                card,
                brand,
                busy_percent: read_trimmed(&device.join("gpu_busy_percent"))
                    .and_then(|v| v.parse::<f32>().ok()),
                vram_total: read_trimmed(&device.join("mem_info_vram_total"))
                    .and_then(|v| v.parse().ok()),
                vram_used: read_trimmed(&device.join("mem_info_vram_used"))
                    .and_then(|v| v.parse().ok()),
                temperature: read_hwmon_temp(&device),
                driver,
            });
        }
    }
    None
}

#[cfg(target_os = "linux")]
fn read_trimmed(path: &std::path::Path) -> Option<String> {
    let v = std::fs::read_to_string(path).ok()?;
    let v = v.trim();
    if v.is_empty() {
        return None;
    }
    Some(v.to_string())
}

/// hwmon reports millidegrees Celsius.
#[cfg(target_os = "linux")]
fn read_hwmon_temp(device: &std::path::Path) -> Option<f32> {
    let hwmon = std::fs::read_dir(device.join("hwmon")).ok()?;
    for entry in hwmon.filter_map(|e| e.ok()) {
        if let Some(raw) = read_trimmed(&entry.path().join("temp1_input"))
            && let Ok(milli) = raw.parse::<f32>()
        {
            return Some(milli / 1000.0);
        }
    }
    None
}
