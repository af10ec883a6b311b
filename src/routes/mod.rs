// HTTP routes

mod api;
mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::snapshot_repo::SnapshotRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) snapshot_repo: Arc<SnapshotRepo>,
    pub(crate) config: AppConfig,
}

pub fn app(snapshot_repo: Arc<SnapshotRepo>, config: AppConfig) -> Router {
    let state = AppState {
        snapshot_repo,
        config,
    };
    Router::new()
        .route("/", get(|| async { "healthboard: daily health-check dashboard" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/status", get(api::status_handler)) // GET /api/status (initial indicator)
        .route("/api/dashboard", get(api::dashboard_handler)) // GET /api/dashboard?chart=
        .route("/api/series", get(api::series_handler)) // GET /api/series
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
