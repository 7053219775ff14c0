// Command handlers. Reads fail with 503, rejected writes with 422.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use super::{AppState, ErrorBody, PositionBody};
use crate::error::{FetchError, WriteError};
use crate::models::MonitorSettings;
use crate::provider::Provider;

type HandlerError = (StatusCode, Json<ErrorBody>);

fn read_failed(e: FetchError) -> HandlerError {
    tracing::warn!(error = %e, "command read failed");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorBody {
            error: e.to_string(),
        }),
    )
}

fn write_failed(e: WriteError) -> HandlerError {
    tracing::warn!(error = %e, "command write failed");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: e.to_string(),
        }),
    )
}

/// GET /version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(super) async fn overview_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HandlerError> {
    let overview = state
        .provider
        .get_hardware_overview()
        .await
        .map_err(read_failed)?;
    Ok(Json(overview))
}

pub(super) async fn realtime_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HandlerError> {
    let stats = state
        .provider
        .get_realtime_stats()
        .await
        .map_err(read_failed)?;
    Ok(Json(stats))
}

pub(super) async fn get_settings_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HandlerError> {
    let settings = state
        .provider
        .get_monitor_settings()
        .await
        .map_err(read_failed)?;
    Ok(Json(settings))
}

pub(super) async fn update_settings_handler(
    State(state): State<AppState>,
    Json(settings): Json<MonitorSettings>,
) -> Result<impl IntoResponse, HandlerError> {
    state
        .provider
        .update_monitor_settings(&settings)
        .await
        .map_err(write_failed)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/overlay: overlay window visibility and placement.
pub(super) async fn overlay_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.provider.overlay_window())
}

pub(super) async fn show_overlay_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HandlerError> {
    state
        .provider
        .show_overlay_window()
        .await
        .map_err(write_failed)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn hide_overlay_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HandlerError> {
    state
        .provider
        .hide_overlay_window()
        .await
        .map_err(write_failed)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn position_handler(
    State(state): State<AppState>,
    Json(body): Json<PositionBody>,
) -> Result<impl IntoResponse, HandlerError> {
    state
        .provider
        .update_overlay_position(body.position)
        .await
        .map_err(write_failed)?;
    Ok(StatusCode::NO_CONTENT)
}
