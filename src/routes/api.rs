// Dashboard API: status indicator, chart view, raw series

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::dashboard::{self, ChartSelection, DashboardView, LoadState};
use crate::error::DashboardError;
use crate::series::{Series, SeriesSummary};

#[derive(Debug, Deserialize)]
pub(super) struct DashboardQuery {
    #[serde(default)]
    chart: ChartSelection,
}

#[derive(Debug, Serialize)]
pub(super) struct SeriesResponse {
    summary: SeriesSummary,
    records: Series,
}

/// Assembly failure rendered as the page's error indicator.
pub(super) struct ApiError(DashboardError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            DashboardError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            DashboardError::NoDataInRange { .. } => StatusCode::NOT_FOUND,
            DashboardError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
        };
        tracing::warn!(error = %self.0, "dashboard request failed");
        (status, Json(LoadState::error(&self.0))).into_response()
    }
}

impl From<DashboardError> for ApiError {
    fn from(e: DashboardError) -> Self {
        Self(e)
    }
}

/// GET /api/status — the initial indicator the page shows before it requests
/// `/api/dashboard`. Always `Loading`; failures surface as the `Error` body of the
/// dashboard and series endpoints.
pub(super) async fn status_handler() -> impl IntoResponse {
    Json(LoadState::loading())
}

/// GET /api/dashboard?chart=all|memory|disk|services — assembled view for the chart layer.
pub(super) async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, ApiError> {
    let view = dashboard::load(state.snapshot_repo.as_ref(), &state.config, query.chart).await?;
    Ok(Json(view))
}

/// GET /api/series — normalized records plus summary.
pub(super) async fn series_handler(
    State(state): State<AppState>,
) -> Result<Json<SeriesResponse>, ApiError> {
    let series = dashboard::load_series(state.snapshot_repo.as_ref(), &state.config).await?;
    Ok(Json(SeriesResponse {
        summary: series.summary(),
        records: series,
    }))
}
