// Settings store: a surface's view of the provider-held MonitorSettings

use std::sync::Arc;
use tokio::sync::watch;

use crate::error::{FetchError, WriteError};
use crate::models::{MonitorPosition, MonitorSettings};
use crate::provider::Provider;

/// Each surface owns one store. The local cache only ever holds the default, a value
/// read back from the provider, or a value this store saved with confirmed success.
pub struct SettingsStore {
    provider: Arc<dyn Provider>,
    cache: watch::Sender<MonitorSettings>,
}

impl SettingsStore {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            cache: watch::Sender::new(MonitorSettings::default()),
        }
    }

    /// Startup read. Falls back to the default on failure; never fatal.
    pub async fn load(&self) -> MonitorSettings {
        let settings = match self.provider.get_monitor_settings().await {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    operation = "load_settings",
                    "settings read failed; using defaults"
                );
                MonitorSettings::default()
            }
        };
        self.cache.send_replace(settings.clone());
        settings
    }

    /// Periodic re-read. On failure the cache keeps its previous value.
    pub async fn poll(&self) -> Result<MonitorSettings, FetchError> {
        let settings = self.provider.get_monitor_settings().await?;
        self.cache.send_if_modified(|cached| {
            if *cached == settings {
                false
            } else {
                *cached = settings.clone();
                true
            }
        });
        Ok(settings)
    }

    /// Writes through; the cache is replaced only once the provider confirms.
    pub async fn save(&self, settings: MonitorSettings) -> Result<(), WriteError> {
        settings.validate()?;
        self.provider.update_monitor_settings(&settings).await?;
        self.cache.send_replace(settings);
        Ok(())
    }

    /// Position-only fast path. Not ordered against `save`: the provider keeps whichever
    /// write it commits last. The cache catches up on the next `poll`.
    pub async fn set_position(&self, position: MonitorPosition) -> Result<(), WriteError> {
        self.provider.update_overlay_position(position).await
    }

    /// Saves, then shows or hides the overlay to match `enabled`.
    /// Window toggling failures are logged; only the save result is returned.
    pub async fn commit(&self, settings: MonitorSettings) -> Result<(), WriteError> {
        let enabled = settings.enabled;
        self.save(settings).await?;
        let toggled = if enabled {
            self.provider.show_overlay_window().await
        } else {
            self.provider.hide_overlay_window().await
        };
        if let Err(e) = toggled {
            tracing::warn!(error = %e, enabled, operation = "toggle_overlay", "overlay toggle failed");
        }
        Ok(())
    }

    pub fn current(&self) -> MonitorSettings {
        self.cache.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MonitorSettings> {
        self.cache.subscribe()
    }
}
