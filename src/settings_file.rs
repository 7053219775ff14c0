// Durable JSON persistence for MonitorSettings (provider side)

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::models::MonitorSettings;

pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing, unreadable or corrupt files fall back to the default settings.
    pub fn load_or_default(&self) -> MonitorSettings {
        match self.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                tracing::info!(path = %self.path.display(), "no settings file; using defaults");
                MonitorSettings::default()
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    operation = "load_settings",
                    "settings file unusable; using defaults"
                );
                MonitorSettings::default()
            }
        }
    }

    pub fn load(&self) -> anyhow::Result<Option<MonitorSettings>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let settings: MonitorSettings = serde_json::from_str(&content)?;
        Ok(Some(settings))
    }

    /// Write-to-temp, fsync, rename, fsync the directory. Readers see either the old or the
    /// new file, never a mix.
    pub async fn save(&self, settings: &MonitorSettings) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, &self.path).await?;
        self.sync_parent().await?;
        Ok(())
    }

    /// Makes the rename itself durable.
    #[cfg(unix)]
    async fn sync_parent(&self) -> anyhow::Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        tokio::fs::File::open(parent).await?.sync_all().await?;
        Ok(())
    }

    #[cfg(not(unix))]
    async fn sync_parent(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
