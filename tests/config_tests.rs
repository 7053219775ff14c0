// Config loading and validation tests

use nanostat::config::AppConfig;
use std::time::Duration;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "127.0.0.1"

[provider]
settings_path = "data/monitor_settings.json"
url = "http://127.0.0.1:8081"
request_timeout_ms = 1500

[dashboard]
refresh_interval_ms = 1000

[overlay]
settings_poll_ms = 1000
screen_width = 2560
screen_height = 1440
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.provider.settings_path, "data/monitor_settings.json");
    assert_eq!(config.request_timeout(), Duration::from_millis(1500));
    assert_eq!(
        config.dashboard_config().refresh_interval,
        Duration::from_millis(1000)
    );
    assert_eq!(config.overlay_config().settings_poll, Duration::from_millis(1000));
    assert_eq!(config.screen().width, 2560.0);
}

#[test]
fn test_optional_sections_default() {
    let minimal = r#"
[server]
port = 8081
host = "127.0.0.1"

[provider]
settings_path = "monitor_settings.json"
url = "http://127.0.0.1:8081"
"#;
    let config = AppConfig::load_from_str(minimal).expect("load_from_str");
    assert_eq!(config.provider.request_timeout_ms, 2000);
    assert_eq!(config.dashboard.refresh_interval_ms, 1000);
    assert_eq!(config.overlay.settings_poll_ms, 1000);
    assert_eq!(config.overlay.screen_width, 1920);
    assert_eq!(config.overlay.screen_height, 1080);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_settings_path() {
    let bad = VALID_CONFIG.replace(
        "settings_path = \"data/monitor_settings.json\"",
        "settings_path = \"\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("provider.settings_path"));
}

#[test]
fn test_config_validation_rejects_empty_url() {
    let bad = VALID_CONFIG.replace("url = \"http://127.0.0.1:8081\"", "url = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("provider.url"));
}

#[test]
fn test_config_validation_rejects_zero_timeout() {
    let bad = VALID_CONFIG.replace("request_timeout_ms = 1500", "request_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("request_timeout_ms"));
}

#[test]
fn test_config_validation_rejects_zero_dashboard_interval() {
    let bad = VALID_CONFIG.replace("refresh_interval_ms = 1000", "refresh_interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("refresh_interval_ms"));
}

#[test]
fn test_config_validation_rejects_zero_settings_poll() {
    let bad = VALID_CONFIG.replace("settings_poll_ms = 1000", "settings_poll_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("settings_poll_ms"));
}

#[test]
fn test_config_validation_rejects_zero_screen() {
    let bad = VALID_CONFIG.replace("screen_width = 2560", "screen_width = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("screen_width"));
}

#[test]
fn test_config_rejects_missing_section() {
    let bad = VALID_CONFIG.replace("[provider]", "[elsewhere]");
    assert!(AppConfig::load_from_str(&bad).is_err());
}
