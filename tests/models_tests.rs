// Wire-shape tests for models

use nanostat::models::*;
use serde_json::json;

#[test]
fn test_settings_wire_shape() {
    let value = serde_json::to_value(MonitorSettings::default()).unwrap();
    assert_eq!(
        value,
        json!({
            "enabled": false,
            "position": "TopCenter",
            "display_items": {
                "cpu": true,
                "cpu_temp": false,
                "gpu": true,
                "gpu_temp": true,
                "memory": true,
                "network": true,
                "fps": false
            },
            "refresh_interval": 1000,
            "opacity": 80
        })
    );
}

#[test]
fn test_settings_without_cpu_temp_flag_decode() {
    let settings: MonitorSettings = serde_json::from_value(json!({
        "enabled": true,
        "position": "BottomCenter",
        "display_items": {
            "cpu": true, "gpu": false, "gpu_temp": false,
            "memory": true, "network": false, "fps": true
        },
        "refresh_interval": 250,
        "opacity": 55
    }))
    .unwrap();
    assert_eq!(settings.position, MonitorPosition::BottomCenter);
    assert!(!settings.display_items.cpu_temp);
    assert!(settings.display_items.fps);
    assert_eq!(settings.refresh_interval, 250);
}

#[test]
fn test_unknown_position_is_rejected() {
    let result: Result<MonitorPosition, _> = serde_json::from_value(json!("Middle"));
    assert!(result.is_err());
}

#[test]
fn test_realtime_without_cpu_temp_decodes() {
    let stats: RealtimeStats = serde_json::from_value(json!({
        "cpu_usage": 12.5,
        "gpu_usage": 3.0,
        "gpu_temp": null,
        "memory_usage": 48.0,
        "network_stats": { "download_rate": 10.0, "upload_rate": 2.0, "latency": null },
        "timestamp": 1700000000000i64
    }))
    .unwrap();
    assert_eq!(stats.cpu_temp, None);
    assert_eq!(stats.gpu_temp, None);
    assert_eq!(stats.timestamp, 1_700_000_000_000);
}

#[test]
fn test_overview_roundtrips_without_gpu() {
    let overview = HardwareOverview {
        cpu: CpuInfo {
            name: "cpu".into(),
            cores: 2,
            threads: 4,
            frequency: 2400,
            usage: 5.0,
            temperature: Some(40.0),
            per_core_usage: vec![1.0, 2.0, 3.0, 4.0],
        },
        gpu: None,
        memory: MemoryInfo {
            total: 1024,
            used: 512,
            available: 512,
            usage: 50.0,
            memory_type: None,
            frequency: None,
        },
        disks: vec![DiskInfo {
            name: "nvme0n1".into(),
            mount_point: "/".into(),
            disk_type: "SSD".into(),
            total: 512.0,
            used: 128.0,
            available: 384.0,
            usage: 25.0,
        }],
        network: NetworkInfo { interfaces: vec![] },
    };
    let value = serde_json::to_value(&overview).unwrap();
    assert!(value["gpu"].is_null());
    assert_eq!(value["disks"][0]["mount_point"], "/");
    let back: HardwareOverview = serde_json::from_value(value).unwrap();
    assert_eq!(back, overview);
}

#[test]
fn test_default_settings_are_valid() {
    assert!(MonitorSettings::default().validate().is_ok());
    assert_eq!(MonitorSettings::default().alpha(), 0.80);
}
