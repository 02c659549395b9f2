use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::{
        api::ErrorDto,
        dashboard::{DashboardDto, DashboardFilter},
        map::{MapDto, MapFilter},
    },
    server::{
        error::Error,
        model::app::AppState,
        service::{dashboard::DashboardService, map::MapService},
    },
};

pub static DASHBOARD_TAG: &str = "dashboard";

/// Responder dashboard snapshot
///
/// Requests, camps and resources for a subdivision, fetched together. Clients re-fetch
/// every `refresh_interval_secs`.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = DASHBOARD_TAG,
    params(DashboardFilter),
    responses(
        (status = 200, description = "Dashboard snapshot", body = DashboardDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> Result<impl IntoResponse, Error> {
    let dashboard = DashboardService::new(&state.db)
        .snapshot(filter, state.dashboard_refresh.as_secs())
        .await?;

    Ok((StatusCode::OK, axum::Json(dashboard)).into_response())
}

/// Map overlay of camps, open alerts and resources
///
/// Records without usable coordinates are listed under `skipped` instead of being placed.
#[utoipa::path(
    get,
    path = "/api/map",
    tag = DASHBOARD_TAG,
    params(MapFilter),
    responses(
        (status = 200, description = "Markers with the default view and tile source", body = MapDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_map(
    State(state): State<AppState>,
    Query(filter): Query<MapFilter>,
) -> Result<impl IntoResponse, Error> {
    let map = MapService::new(&state.db).overlay(filter).await?;

    Ok((StatusCode::OK, axum::Json(map)).into_response())
}
