// HTTP client provider: the command surface of a `nanostat serve` process

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;

use super::Provider;
use crate::error::{FetchError, WriteError};
use crate::models::{HardwareOverview, MonitorPosition, MonitorSettings, RealtimeStats};
use crate::routes::{ErrorBody, PositionBody};

pub struct RemoteProvider {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteProvider {
    /// `timeout` bounds each round trip; a stalled server surfaces as `Timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(fetch_error)?;
        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(FetchError::Unreachable(format!("{}: {}", status, message)));
        }
        let body = response.bytes().await.map_err(fetch_error)?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Deserialize(e.to_string()))
    }

    async fn send_write(&self, request: reqwest::RequestBuilder) -> Result<(), WriteError> {
        let response = request.send().await.map_err(write_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = error_message(response).await;
        tracing::debug!(status = %status, message = %message, "provider rejected write");
        Err(WriteError::WriteRejected(message))
    }
}

fn fetch_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_decode() {
        FetchError::Deserialize(e.to_string())
    } else {
        FetchError::Unreachable(e.to_string())
    }
}

fn write_error(e: reqwest::Error) -> WriteError {
    if e.is_timeout() {
        WriteError::Timeout
    } else {
        WriteError::Unreachable(e.to_string())
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    }
}

#[async_trait]
impl Provider for RemoteProvider {
    #[instrument(skip(self), fields(provider = "remote", operation = "get_hardware_overview"))]
    async fn get_hardware_overview(&self) -> Result<HardwareOverview, FetchError> {
        self.get_json("/api/hardware/overview").await
    }

    #[instrument(skip(self), fields(provider = "remote", operation = "get_realtime_stats"))]
    async fn get_realtime_stats(&self) -> Result<RealtimeStats, FetchError> {
        self.get_json("/api/hardware/realtime").await
    }

    #[instrument(skip(self), fields(provider = "remote", operation = "get_monitor_settings"))]
    async fn get_monitor_settings(&self) -> Result<MonitorSettings, FetchError> {
        self.get_json("/api/monitor/settings").await
    }

    #[instrument(skip(self, settings), fields(provider = "remote", operation = "update_monitor_settings"))]
    async fn update_monitor_settings(&self, settings: &MonitorSettings) -> Result<(), WriteError> {
        self.send_write(
            self.client
                .put(self.url("/api/monitor/settings"))
                .json(settings),
        )
        .await
    }

    async fn show_overlay_window(&self) -> Result<(), WriteError> {
        self.send_write(self.client.post(self.url("/api/overlay/show")))
            .await
    }

    async fn hide_overlay_window(&self) -> Result<(), WriteError> {
        self.send_write(self.client.post(self.url("/api/overlay/hide")))
            .await
    }

    #[instrument(skip(self), fields(provider = "remote", operation = "update_overlay_position"))]
    async fn update_overlay_position(&self, position: MonitorPosition) -> Result<(), WriteError> {
        self.send_write(
            self.client
                .put(self.url("/api/overlay/position"))
                .json(&PositionBody { position }),
        )
        .await
    }
}
