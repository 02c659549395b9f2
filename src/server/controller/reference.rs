use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    model::{api::ErrorDto, subdivision::SubdivisionDto, water_level::WaterLevelDto},
    server::{
        error::Error,
        model::app::AppState,
        service::{subdivision::SubdivisionService, water_level},
    },
};

pub static REFERENCE_TAG: &str = "reference";

/// List subdivisions with their district names
#[utoipa::path(
    get,
    path = "/api/subdivisions",
    tag = REFERENCE_TAG,
    responses(
        (status = 200, description = "All subdivisions", body = Vec<SubdivisionDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_subdivisions(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let subdivisions = SubdivisionService::new(&state.db).list().await?;

    Ok((StatusCode::OK, axum::Json(subdivisions)).into_response())
}

/// Current dam reservoir levels
#[utoipa::path(
    get,
    path = "/api/water-levels",
    tag = REFERENCE_TAG,
    responses(
        (status = 200, description = "Reservoir levels", body = Vec<WaterLevelDto>)
    ),
)]
pub async fn list_water_levels() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(water_level::latest()))
}
