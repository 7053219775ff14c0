use serde::Deserialize;
use std::time::Duration;

use crate::overlay_window::ScreenSize;
use crate::surface::dashboard::DashboardConfig;
use crate::surface::overlay::OverlayConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub dashboard: DashboardSection,
    #[serde(default)]
    pub overlay: OverlaySection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Where `serve` persists MonitorSettings.
    pub settings_path: String,
    /// Base URL surfaces use to reach `serve`.
    pub url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSection {
    #[serde(default = "default_dashboard_refresh_ms")]
    pub refresh_interval_ms: u64,
}

fn default_dashboard_refresh_ms() -> u64 {
    1000
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_dashboard_refresh_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverlaySection {
    #[serde(default = "default_settings_poll_ms")]
    pub settings_poll_ms: u64,
    /// Logical screen the overlay is placed on.
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
}

fn default_settings_poll_ms() -> u64 {
    1000
}

fn default_screen_width() -> u32 {
    1920
}

fn default_screen_height() -> u32 {
    1080
}

impl Default for OverlaySection {
    fn default() -> Self {
        Self {
            settings_poll_ms: default_settings_poll_ms(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
        }
    }
}

impl AppConfig {
    /// Reads `path`, or `NANOSTAT_CONFIG`, or `nanostat.toml`.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_string(),
            None => std::env::var("NANOSTAT_CONFIG").unwrap_or_else(|_| "nanostat.toml".into()),
        };
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            !self.provider.settings_path.is_empty(),
            "provider.settings_path must be non-empty"
        );
        anyhow::ensure!(!self.provider.url.is_empty(), "provider.url must be non-empty");
        anyhow::ensure!(
            self.provider.request_timeout_ms > 0,
            "provider.request_timeout_ms must be > 0, got {}",
            self.provider.request_timeout_ms
        );
        anyhow::ensure!(
            self.dashboard.refresh_interval_ms > 0,
            "dashboard.refresh_interval_ms must be > 0, got {}",
            self.dashboard.refresh_interval_ms
        );
        anyhow::ensure!(
            self.overlay.settings_poll_ms > 0,
            "overlay.settings_poll_ms must be > 0, got {}",
            self.overlay.settings_poll_ms
        );
        anyhow::ensure!(
            self.overlay.screen_width > 0 && self.overlay.screen_height > 0,
            "overlay.screen_width and overlay.screen_height must be > 0, got {}x{}",
            self.overlay.screen_width,
            self.overlay.screen_height
        );
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.provider.request_timeout_ms)
    }

    pub fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            refresh_interval: Duration::from_millis(self.dashboard.refresh_interval_ms),
        }
    }

    pub fn overlay_config(&self) -> OverlayConfig {
        OverlayConfig {
            settings_poll: Duration::from_millis(self.overlay.settings_poll_ms),
        }
    }

    pub fn screen(&self) -> ScreenSize {
        ScreenSize {
            width: f64::from(self.overlay.screen_width),
            height: f64::from(self.overlay.screen_height),
        }
    }
}
