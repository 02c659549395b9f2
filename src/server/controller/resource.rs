use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::{
        api::ErrorDto,
        resource::{CreateResourceDto, ResourceDto, ResourceFilter, UpdateResourceDto},
    },
    server::{error::Error, model::app::AppState, service::resource::ResourceService},
};

pub static RESOURCE_TAG: &str = "resource";

/// List resources, newest first
#[utoipa::path(
    get,
    path = "/api/resources",
    tag = RESOURCE_TAG,
    params(ResourceFilter),
    responses(
        (status = 200, description = "Matching resources", body = Vec<ResourceDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_resources(
    State(state): State<AppState>,
    Query(filter): Query<ResourceFilter>,
) -> Result<impl IntoResponse, Error> {
    let resources = ResourceService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, axum::Json(resources)).into_response())
}

/// Register a resource offer
#[utoipa::path(
    post,
    path = "/api/resources",
    tag = RESOURCE_TAG,
    request_body = CreateResourceDto,
    responses(
        (status = 201, description = "Resource created", body = ResourceDto),
        (status = 400, description = "Invalid resource", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_resource(
    State(state): State<AppState>,
    axum::Json(dto): axum::Json<CreateResourceDto>,
) -> Result<impl IntoResponse, Error> {
    let resource = ResourceService::new(&state.db).create(dto).await?;

    Ok((StatusCode::CREATED, axum::Json(resource)).into_response())
}

/// Update a resource; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/resources/{id}",
    tag = RESOURCE_TAG,
    params(("id" = i32, Path, description = "Resource ID")),
    request_body = UpdateResourceDto,
    responses(
        (status = 200, description = "Resource updated", body = ResourceDto),
        (status = 400, description = "Invalid update", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_resource(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<UpdateResourceDto>,
) -> Result<impl IntoResponse, Error> {
    let resource = ResourceService::new(&state.db).update(id, dto).await?;

    Ok((StatusCode::OK, axum::Json(resource)).into_response())
}

/// Delete a resource
#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    tag = RESOURCE_TAG,
    params(("id" = i32, Path, description = "Resource ID")),
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_resource(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    ResourceService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
