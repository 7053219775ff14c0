// In-process provider: host sampling + the authoritative, persisted settings

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tracing::instrument;

use super::Provider;
use crate::error::{FetchError, WriteError};
use crate::models::{HardwareOverview, MonitorPosition, MonitorSettings, RealtimeStats};
use crate::overlay_window::{OverlayWindow, ScreenSize};
use crate::settings_file::SettingsFile;
use crate::sysinfo_repo::SysinfoRepo;

pub struct LocalProvider {
    sysinfo_repo: Arc<SysinfoRepo>,
    settings_file: SettingsFile,
    /// Last committed settings. Replaced whole, only after the file write succeeded.
    settings: RwLock<MonitorSettings>,
    /// Serializes settings writes; commit order is lock order.
    write_lock: tokio::sync::Mutex<()>,
    overlay: RwLock<OverlayWindow>,
}

impl LocalProvider {
    pub fn new(
        sysinfo_repo: Arc<SysinfoRepo>,
        settings_file: SettingsFile,
        screen: ScreenSize,
    ) -> Self {
        let settings = settings_file.load_or_default();
        let overlay = OverlayWindow::new(settings.position, screen);
        Self {
            sysinfo_repo,
            settings_file,
            settings: RwLock::new(settings),
            write_lock: tokio::sync::Mutex::new(()),
            overlay: RwLock::new(overlay),
        }
    }

    pub fn overlay_window(&self) -> OverlayWindow {
        match self.overlay.read() {
            Ok(w) => w.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn current_settings(&self) -> MonitorSettings {
        match self.settings.read() {
            Ok(s) => s.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Persists `next` then publishes it. Caller must hold `write_lock`.
    async fn commit(&self, next: MonitorSettings) -> Result<(), WriteError> {
        next.validate()
            .map_err(|e| WriteError::WriteRejected(e.to_string()))?;
        self.settings_file.save(&next).await.map_err(|e| {
            tracing::warn!(
                error = %e,
                path = %self.settings_file.path().display(),
                operation = "save_settings",
                "settings write failed"
            );
            WriteError::WriteRejected(format!("failed to persist settings: {}", e))
        })?;
        let position = next.position;
        match self.settings.write() {
            Ok(mut s) => *s = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
        self.with_overlay(|w| {
            if w.position != position {
                w.reposition(position);
            }
        });
        Ok(())
    }

    fn with_overlay(&self, f: impl FnOnce(&mut OverlayWindow)) {
        match self.overlay.write() {
            Ok(mut w) => f(&mut *w),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

#[async_trait]
impl Provider for LocalProvider {
    async fn get_hardware_overview(&self) -> Result<HardwareOverview, FetchError> {
        self.sysinfo_repo
            .get_hardware_overview()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))
    }

    async fn get_realtime_stats(&self) -> Result<RealtimeStats, FetchError> {
        self.sysinfo_repo
            .get_realtime_stats()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))
    }

    async fn get_monitor_settings(&self) -> Result<MonitorSettings, FetchError> {
        Ok(self.current_settings())
    }

    #[instrument(skip(self, settings), fields(provider = "local", operation = "update_monitor_settings"))]
    async fn update_monitor_settings(&self, settings: &MonitorSettings) -> Result<(), WriteError> {
        let _guard = self.write_lock.lock().await;
        self.commit(settings.clone()).await?;
        tracing::info!(
            enabled = settings.enabled,
            position = %settings.position,
            refresh_interval = settings.refresh_interval,
            opacity = settings.opacity,
            "monitor settings updated"
        );
        Ok(())
    }

    async fn show_overlay_window(&self) -> Result<(), WriteError> {
        let position = self.current_settings().position;
        self.with_overlay(|w| {
            w.reposition(position);
            w.show();
        });
        tracing::debug!(position = %position, "overlay shown");
        Ok(())
    }

    async fn hide_overlay_window(&self) -> Result<(), WriteError> {
        self.with_overlay(OverlayWindow::hide);
        tracing::debug!("overlay hidden");
        Ok(())
    }

    #[instrument(skip(self), fields(provider = "local", operation = "update_overlay_position"))]
    async fn update_overlay_position(&self, position: MonitorPosition) -> Result<(), WriteError> {
        let _guard = self.write_lock.lock().await;
        let next = MonitorSettings {
            position,
            ..self.current_settings()
        };
        self.commit(next).await?;
        tracing::info!(position = %position, "overlay position updated");
        Ok(())
    }
}
