use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::ErrorDto,
        emergency::{AssignEmergencyDto, AssignmentDto, CreateEmergencyDto, EmergencyDto, EmergencyFilter},
    },
    server::{
        error::{validation::ValidationError, Error},
        model::app::AppState,
        service::{
            assignment::AssignmentService, emergency::EmergencyService, intake::IntakeService,
        },
    },
};

pub static EMERGENCY_TAG: &str = "emergency";

/// Header carrying the client's idempotency key for SOS submissions
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Submit an SOS request
///
/// Open to unauthenticated submitters. Re-sending the same `Idempotency-Key` returns the
/// originally stored request instead of creating another one.
#[utoipa::path(
    post,
    path = "/api/emergency",
    tag = EMERGENCY_TAG,
    params(
        ("Idempotency-Key" = Option<String>, Header, description = "Client generated key, 1 to 128 characters"),
    ),
    request_body = CreateEmergencyDto,
    responses(
        (status = 201, description = "Request stored", body = EmergencyDto),
        (status = 200, description = "Request already stored under this idempotency key", body = EmergencyDto),
        (status = 400, description = "Invalid submission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_emergency(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(dto): axum::Json<CreateEmergencyDto>,
) -> Result<impl IntoResponse, Error> {
    let idempotency_key = headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .map(|value| {
            value.to_str().map_err(|_| {
                ValidationError::new(
                    IDEMPOTENCY_KEY_HEADER,
                    "Idempotency-Key must be visible ASCII",
                )
            })
        })
        .transpose()?;

    let submission = IntakeService::new(&state.db)
        .submit(dto, idempotency_key)
        .await?;

    let status = if submission.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, axum::Json(submission.request)).into_response())
}

/// List emergency requests, newest first
///
/// Filtering by subdivision also returns requests that have no subdivision.
#[utoipa::path(
    get,
    path = "/api/emergency",
    tag = EMERGENCY_TAG,
    params(EmergencyFilter),
    responses(
        (status = 200, description = "Matching requests", body = Vec<EmergencyDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_emergencies(
    State(state): State<AppState>,
    Query(filter): Query<EmergencyFilter>,
) -> Result<impl IntoResponse, Error> {
    let requests = EmergencyService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, axum::Json(requests)).into_response())
}

/// Mark an emergency request resolved
#[utoipa::path(
    post,
    path = "/api/emergency/{id}/resolve",
    tag = EMERGENCY_TAG,
    params(("id" = i32, Path, description = "Emergency request ID")),
    responses(
        (status = 200, description = "Request resolved, or already resolved", body = EmergencyDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resolve_emergency(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let request = EmergencyService::new(&state.db).resolve(id).await?;

    Ok((StatusCode::OK, axum::Json(request)).into_response())
}

/// Dispatch an emergency request to a rescue team
#[utoipa::path(
    post,
    path = "/api/emergency/{id}/assign",
    tag = EMERGENCY_TAG,
    params(("id" = i32, Path, description = "Emergency request ID")),
    request_body = AssignEmergencyDto,
    responses(
        (status = 201, description = "Assignment created, awaiting acceptance", body = AssignmentDto),
        (status = 404, description = "Request or team not found", body = ErrorDto),
        (status = 409, description = "Request is resolved or already assigned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_emergency(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<AssignEmergencyDto>,
) -> Result<impl IntoResponse, Error> {
    let assignment = AssignmentService::new(&state.db).assign(id, dto).await?;

    Ok((StatusCode::CREATED, axum::Json(assignment)).into_response())
}
