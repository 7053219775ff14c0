// Command surface of the snapshot provider / settings store collaborator.
// Surfaces only ever talk to it through this trait; they never share memory.

mod local;
mod remote;

pub use local::LocalProvider;
pub use remote::RemoteProvider;

use async_trait::async_trait;

use crate::error::{FetchError, WriteError};
use crate::models::{HardwareOverview, MonitorPosition, MonitorSettings, RealtimeStats};

#[async_trait]
pub trait Provider: Send + Sync {
    async fn get_hardware_overview(&self) -> Result<HardwareOverview, FetchError>;

    async fn get_realtime_stats(&self) -> Result<RealtimeStats, FetchError>;

    async fn get_monitor_settings(&self) -> Result<MonitorSettings, FetchError>;

    /// Must be durable before returning `Ok`.
    async fn update_monitor_settings(&self, settings: &MonitorSettings) -> Result<(), WriteError>;

    async fn show_overlay_window(&self) -> Result<(), WriteError>;

    async fn hide_overlay_window(&self) -> Result<(), WriteError>;

    /// Position-only write. Races with `update_monitor_settings`; the provider keeps
    /// whichever write it commits last.
    async fn update_overlay_position(&self, position: MonitorPosition) -> Result<(), WriteError>;
}
