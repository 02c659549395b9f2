//! Camera configuration routes.
//!
//! `DELETE /api/cameras/{kind}/{id}` and `POST /api/cameras/{kind}/{id}/restore` are
//! registered once per kind so they share a path with the kind's other routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::{
        api::ErrorDto,
        camera::{
            CameraDto, CameraFilter, CameraKind, CreateRescueCameraDto,
            CreateWaterLevelCameraDto, PendingDeleteDto, RescueCameraDto, UpdateRescueCameraDto,
            UpdateWaterLevelCameraDto, WaterLevelCameraDto, WaterLevelReadingDto,
        },
    },
    server::{error::Error, model::app::AppState, service::camera::CameraService},
};

pub static CAMERA_TAG: &str = "camera";

async fn delete_camera(
    state: AppState,
    kind: CameraKind,
    id: i32,
) -> Result<impl IntoResponse, Error> {
    let pending = CameraService::new(&state.db)
        .delete(kind, id, state.camera_undo_window)
        .await?;

    Ok((StatusCode::ACCEPTED, axum::Json(pending)).into_response())
}

async fn restore_camera(
    state: AppState,
    kind: CameraKind,
    id: i32,
) -> Result<impl IntoResponse, Error> {
    let camera = CameraService::new(&state.db).restore(kind, id).await?;

    Ok((StatusCode::OK, axum::Json(camera)).into_response())
}

/// List rescue cameras
#[utoipa::path(
    get,
    path = "/api/cameras/rescue",
    tag = CAMERA_TAG,
    params(CameraFilter),
    responses(
        (status = 200, description = "Rescue cameras not pending deletion", body = Vec<RescueCameraDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_rescue_cameras(
    State(state): State<AppState>,
    Query(filter): Query<CameraFilter>,
) -> Result<impl IntoResponse, Error> {
    let cameras = CameraService::new(&state.db).list_rescue(filter).await?;

    Ok((StatusCode::OK, axum::Json(cameras)).into_response())
}

/// Add a rescue camera feed
#[utoipa::path(
    post,
    path = "/api/cameras/rescue",
    tag = CAMERA_TAG,
    request_body = CreateRescueCameraDto,
    responses(
        (status = 201, description = "Camera created", body = RescueCameraDto),
        (status = 400, description = "Feed config missing the key its feed type requires", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_rescue_camera(
    State(state): State<AppState>,
    axum::Json(dto): axum::Json<CreateRescueCameraDto>,
) -> Result<impl IntoResponse, Error> {
    let camera = CameraService::new(&state.db).create_rescue(dto).await?;

    Ok((StatusCode::CREATED, axum::Json(camera)).into_response())
}

/// Edit a rescue camera
#[utoipa::path(
    put,
    path = "/api/cameras/rescue/{id}",
    tag = CAMERA_TAG,
    params(("id" = i32, Path, description = "Rescue camera ID")),
    request_body = UpdateRescueCameraDto,
    responses(
        (status = 200, description = "Camera updated", body = RescueCameraDto),
        (status = 400, description = "Invalid update", body = ErrorDto),
        (status = 404, description = "Camera not found or pending deletion", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_rescue_camera(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<UpdateRescueCameraDto>,
) -> Result<impl IntoResponse, Error> {
    let camera = CameraService::new(&state.db).update_rescue(id, dto).await?;

    Ok((StatusCode::OK, axum::Json(camera)).into_response())
}

/// Delete a rescue camera, restorable until `undo_until`
#[utoipa::path(
    delete,
    path = "/api/cameras/rescue/{id}",
    tag = CAMERA_TAG,
    params(("id" = i32, Path, description = "Rescue camera ID")),
    responses(
        (status = 202, description = "Camera scheduled for deletion", body = PendingDeleteDto),
        (status = 404, description = "Camera not found or already pending deletion", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_rescue_camera(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    delete_camera(state, CameraKind::Rescue, id).await
}

/// Undo a pending rescue camera deletion
#[utoipa::path(
    post,
    path = "/api/cameras/rescue/{id}/restore",
    tag = CAMERA_TAG,
    params(("id" = i32, Path, description = "Rescue camera ID")),
    responses(
        (status = 200, description = "Camera restored", body = CameraDto),
        (status = 404, description = "No pending deletion within its undo window", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn restore_rescue_camera(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    restore_camera(state, CameraKind::Rescue, id).await
}

/// List water-level cameras
#[utoipa::path(
    get,
    path = "/api/cameras/water-level",
    tag = CAMERA_TAG,
    responses(
        (status = 200, description = "Water-level cameras not pending deletion", body = Vec<WaterLevelCameraDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_water_level_cameras(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let cameras = CameraService::new(&state.db).list_water_level().await?;

    Ok((StatusCode::OK, axum::Json(cameras)).into_response())
}

/// Add a water-level camera
#[utoipa::path(
    post,
    path = "/api/cameras/water-level",
    tag = CAMERA_TAG,
    request_body = CreateWaterLevelCameraDto,
    responses(
        (status = 201, description = "Camera created", body = WaterLevelCameraDto),
        (status = 400, description = "Invalid ROI or calibration", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_water_level_camera(
    State(state): State<AppState>,
    axum::Json(dto): axum::Json<CreateWaterLevelCameraDto>,
) -> Result<impl IntoResponse, Error> {
    let camera = CameraService::new(&state.db).create_water_level(dto).await?;

    Ok((StatusCode::CREATED, axum::Json(camera)).into_response())
}

/// Edit a water-level camera
#[utoipa::path(
    put,
    path = "/api/cameras/water-level/{id}",
    tag = CAMERA_TAG,
    params(("id" = i32, Path, description = "Water-level camera ID")),
    request_body = UpdateWaterLevelCameraDto,
    responses(
        (status = 200, description = "Camera updated", body = WaterLevelCameraDto),
        (status = 400, description = "Invalid ROI or calibration", body = ErrorDto),
        (status = 404, description = "Camera not found or pending deletion", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_water_level_camera(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<UpdateWaterLevelCameraDto>,
) -> Result<impl IntoResponse, Error> {
    let camera = CameraService::new(&state.db)
        .update_water_level(id, dto)
        .await?;

    Ok((StatusCode::OK, axum::Json(camera)).into_response())
}

/// Record the latest water level measured by a camera
#[utoipa::path(
    put,
    path = "/api/cameras/water-level/{id}/reading",
    tag = CAMERA_TAG,
    params(("id" = i32, Path, description = "Water-level camera ID")),
    request_body = WaterLevelReadingDto,
    responses(
        (status = 200, description = "Reading recorded", body = WaterLevelCameraDto),
        (status = 400, description = "Reading outside the calibrated range", body = ErrorDto),
        (status = 404, description = "Camera not found or pending deletion", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn record_water_level_reading(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<WaterLevelReadingDto>,
) -> Result<impl IntoResponse, Error> {
    let camera = CameraService::new(&state.db).record_reading(id, dto).await?;

    Ok((StatusCode::OK, axum::Json(camera)).into_response())
}

/// Delete a water-level camera, restorable until `undo_until`
#[utoipa::path(
    delete,
    path = "/api/cameras/water-level/{id}",
    tag = CAMERA_TAG,
    params(("id" = i32, Path, description = "Water-level camera ID")),
    responses(
        (status = 202, description = "Camera scheduled for deletion", body = PendingDeleteDto),
        (status = 404, description = "Camera not found or already pending deletion", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_water_level_camera(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    delete_camera(state, CameraKind::WaterLevel, id).await
}

/// Undo a pending water-level camera deletion
#[utoipa::path(
    post,
    path = "/api/cameras/water-level/{id}/restore",
    tag = CAMERA_TAG,
    params(("id" = i32, Path, description = "Water-level camera ID")),
    responses(
        (status = 200, description = "Camera restored", body = CameraDto),
        (status = 404, description = "No pending deletion within its undo window", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn restore_water_level_camera(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    restore_camera(state, CameraKind::WaterLevel, id).await
}
