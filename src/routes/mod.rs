// HTTP command surface over a LocalProvider

mod http;

use axum::{
    Router,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::models::MonitorPosition;
use crate::provider::LocalProvider;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) provider: Arc<LocalProvider>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionBody {
    pub position: MonitorPosition,
}

pub fn app(provider: Arc<LocalProvider>) -> Router {
    let state = AppState { provider };
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/hardware/overview", get(http::overview_handler)) // GET /api/hardware/overview
        .route("/api/hardware/realtime", get(http::realtime_handler)) // GET /api/hardware/realtime
        .route(
            "/api/monitor/settings",
            get(http::get_settings_handler).put(http::update_settings_handler),
        ) // GET|PUT /api/monitor/settings
        .route("/api/overlay", get(http::overlay_handler)) // GET /api/overlay
        .route("/api/overlay/show", post(http::show_overlay_handler)) // POST /api/overlay/show
        .route("/api/overlay/hide", post(http::hide_overlay_handler)) // POST /api/overlay/hide
        .route("/api/overlay/position", put(http::position_handler)) // PUT /api/overlay/position
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
