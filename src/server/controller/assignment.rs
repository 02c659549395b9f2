use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::{api::ErrorDto, emergency::AssignmentDto},
    server::{
        error::Error,
        model::app::AppState,
        service::assignment::{AssignmentAction, AssignmentService},
    },
};

pub static ASSIGNMENT_TAG: &str = "assignment";

async fn apply(state: AppState, id: i32, action: AssignmentAction) -> Result<impl IntoResponse, Error> {
    let assignment = AssignmentService::new(&state.db).apply(id, action).await?;

    Ok((StatusCode::OK, axum::Json(assignment)).into_response())
}

/// Accept an assignment awaiting acceptance
#[utoipa::path(
    post,
    path = "/api/assignments/{id}/accept",
    tag = ASSIGNMENT_TAG,
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment accepted", body = AssignmentDto),
        (status = 404, description = "Assignment not found", body = ErrorDto),
        (status = 409, description = "Assignment is not awaiting acceptance", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_assignment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    apply(state, id, AssignmentAction::Accept).await
}

/// Reject an assignment, returning the request to the unassigned pool
#[utoipa::path(
    post,
    path = "/api/assignments/{id}/reject",
    tag = ASSIGNMENT_TAG,
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment rejected", body = AssignmentDto),
        (status = 404, description = "Assignment not found", body = ErrorDto),
        (status = 409, description = "Assignment is not awaiting acceptance", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_assignment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    apply(state, id, AssignmentAction::Reject).await
}

/// Complete an accepted assignment, resolving its request
#[utoipa::path(
    post,
    path = "/api/assignments/{id}/complete",
    tag = ASSIGNMENT_TAG,
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment completed", body = AssignmentDto),
        (status = 404, description = "Assignment not found", body = ErrorDto),
        (status = 409, description = "Assignment has not been accepted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_assignment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    apply(state, id, AssignmentAction::Complete).await
}
