use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::{
        api::ErrorDto,
        camp::{
            CampDto, CampFilter, CampStatusUpdateDto, CreateCampDto, OccupancyUpdateDto,
            UpdateCampDto,
        },
    },
    server::{error::Error, model::app::AppState, service::camp::CampService},
};

pub static CAMP_TAG: &str = "camp";

/// List relief camps, newest first
#[utoipa::path(
    get,
    path = "/api/camps",
    tag = CAMP_TAG,
    params(CampFilter),
    responses(
        (status = 200, description = "Matching camps", body = Vec<CampDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_camps(
    State(state): State<AppState>,
    Query(filter): Query<CampFilter>,
) -> Result<impl IntoResponse, Error> {
    let camps = CampService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, axum::Json(camps)).into_response())
}

/// Register a relief camp
#[utoipa::path(
    post,
    path = "/api/camps",
    tag = CAMP_TAG,
    request_body = CreateCampDto,
    responses(
        (status = 201, description = "Camp created", body = CampDto),
        (status = 400, description = "Invalid camp", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_camp(
    State(state): State<AppState>,
    axum::Json(dto): axum::Json<CreateCampDto>,
) -> Result<impl IntoResponse, Error> {
    let camp = CampService::new(&state.db).create(dto).await?;

    Ok((StatusCode::CREATED, axum::Json(camp)).into_response())
}

/// Update camp details; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/camps/{id}",
    tag = CAMP_TAG,
    params(("id" = i32, Path, description = "Camp ID")),
    request_body = UpdateCampDto,
    responses(
        (status = 200, description = "Camp updated", body = CampDto),
        (status = 400, description = "Invalid update", body = ErrorDto),
        (status = 404, description = "Camp not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_camp(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<UpdateCampDto>,
) -> Result<impl IntoResponse, Error> {
    let camp = CampService::new(&state.db).update(id, dto).await?;

    Ok((StatusCode::OK, axum::Json(camp)).into_response())
}

/// Delete a camp
#[utoipa::path(
    delete,
    path = "/api/camps/{id}",
    tag = CAMP_TAG,
    params(("id" = i32, Path, description = "Camp ID")),
    responses(
        (status = 204, description = "Camp deleted"),
        (status = 404, description = "Camp not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_camp(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    CampService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Set camp occupancy, absolutely or as a change to the current headcount
#[utoipa::path(
    put,
    path = "/api/camps/{id}/occupancy",
    tag = CAMP_TAG,
    params(("id" = i32, Path, description = "Camp ID")),
    request_body = OccupancyUpdateDto,
    responses(
        (status = 200, description = "Occupancy updated", body = CampDto),
        (status = 400, description = "Occupancy outside 0 to capacity", body = ErrorDto),
        (status = 404, description = "Camp not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_camp_occupancy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<OccupancyUpdateDto>,
) -> Result<impl IntoResponse, Error> {
    let camp = CampService::new(&state.db).set_occupancy(id, dto).await?;

    Ok((StatusCode::OK, axum::Json(camp)).into_response())
}

/// Close or reopen a camp
#[utoipa::path(
    put,
    path = "/api/camps/{id}/status",
    tag = CAMP_TAG,
    params(("id" = i32, Path, description = "Camp ID")),
    request_body = CampStatusUpdateDto,
    responses(
        (status = 200, description = "Status updated", body = CampDto),
        (status = 404, description = "Camp not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_camp_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<CampStatusUpdateDto>,
) -> Result<impl IntoResponse, Error> {
    let camp = CampService::new(&state.db).set_closed(id, dto).await?;

    Ok((StatusCode::OK, axum::Json(camp)).into_response())
}
