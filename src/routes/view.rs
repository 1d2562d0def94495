use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::plant_api::{Reading, WindowSelector};
use crate::view::format::{chart_points, window_buttons, ChartPoint, WindowButton};
use crate::view::ViewState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ViewResponse {
    /// Currently selected time window
    pub selector: WindowSelector,
    /// True while a fetch for the selected window is outstanding
    pub is_loading: bool,
    /// Readings as returned by the data service
    pub readings: Vec<Reading>,
    /// Rendered line series, one point per reading
    pub chart: Vec<ChartPoint>,
    /// Window buttons
    pub windows: Vec<WindowButton>,
    /// Last fetch failure for the selected window, if any
    pub notice: Option<String>,
}

impl From<ViewState> for ViewResponse {
    fn from(state: ViewState) -> Self {
        Self {
            selector: state.selector,
            is_loading: state.is_loading,
            chart: chart_points(&state.readings),
            readings: state.readings.to_vec(),
            windows: window_buttons(state.selector),
            notice: state.notice,
        }
    }
}

/// Current view state
#[utoipa::path(
    get,
    path = "/api/view",
    responses(
        (status = 200, description = "Current view state", body = ViewResponse),
    ),
    tag = "view"
)]
pub async fn get_view(State(state): State<AppState>) -> Json<ViewResponse> {
    Json(state.view.snapshot().into())
}

/// Select a time window
///
/// Selecting the window that is already shown does not trigger a fetch.
#[utoipa::path(
    post,
    path = "/api/window/{selector}",
    params(
        ("selector" = String, Path, description = "Time window: all, 30d or 7d"),
    ),
    responses(
        (status = 202, description = "Window selected", body = ViewResponse),
        (status = 400, description = "Unknown time window"),
        (status = 503, description = "View runtime stopped"),
    ),
    tag = "view"
)]
pub async fn select_window(
    State(state): State<AppState>,
    Path(selector): Path<String>,
) -> AppResult<(StatusCode, Json<ViewResponse>)> {
    let selector = selector
        .parse::<WindowSelector>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let view = state.view.select_window(selector).await?;
    Ok((StatusCode::ACCEPTED, Json(view.into())))
}

/// Re-fetch the current window
#[utoipa::path(
    post,
    path = "/api/refresh",
    responses(
        (status = 202, description = "Refresh started", body = ViewResponse),
        (status = 503, description = "View runtime stopped"),
    ),
    tag = "view"
)]
pub async fn refresh(State(state): State<AppState>) -> AppResult<(StatusCode, Json<ViewResponse>)> {
    let view = state.view.refresh().await?;
    Ok((StatusCode::ACCEPTED, Json(view.into())))
}
