use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::{
        api::ErrorDto,
        emergency::AssignmentDto,
        team::{CreateTeamDto, CreateTeamMemberDto, TeamDto, TeamFilter, TeamMemberDto},
    },
    server::{
        error::Error,
        model::app::AppState,
        service::{assignment::AssignmentService, team::TeamService},
    },
};

pub static TEAM_TAG: &str = "team";

/// List rescue teams with their members
#[utoipa::path(
    get,
    path = "/api/teams",
    tag = TEAM_TAG,
    params(TeamFilter),
    responses(
        (status = 200, description = "Matching teams", body = Vec<TeamDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_teams(
    State(state): State<AppState>,
    Query(filter): Query<TeamFilter>,
) -> Result<impl IntoResponse, Error> {
    let teams = TeamService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, axum::Json(teams)).into_response())
}

/// Register a rescue team and its initial members
#[utoipa::path(
    post,
    path = "/api/teams",
    tag = TEAM_TAG,
    request_body = CreateTeamDto,
    responses(
        (status = 201, description = "Team created", body = TeamDto),
        (status = 400, description = "Invalid team or member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_team(
    State(state): State<AppState>,
    axum::Json(dto): axum::Json<CreateTeamDto>,
) -> Result<impl IntoResponse, Error> {
    let team = TeamService::new(&state.db).create(dto).await?;

    Ok((StatusCode::CREATED, axum::Json(team)).into_response())
}

/// Delete a team and its members
///
/// Camps, resources and cameras managed by the team are kept without an owner.
#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    tag = TEAM_TAG,
    params(("id" = i32, Path, description = "Team lead ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    TeamService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Add a member to a team
#[utoipa::path(
    post,
    path = "/api/teams/{id}/members",
    tag = TEAM_TAG,
    params(("id" = i32, Path, description = "Team lead ID")),
    request_body = CreateTeamMemberDto,
    responses(
        (status = 201, description = "Member added", body = TeamMemberDto),
        (status = 400, description = "Invalid member", body = ErrorDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_team_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<CreateTeamMemberDto>,
) -> Result<impl IntoResponse, Error> {
    let member = TeamService::new(&state.db).add_member(id, dto).await?;

    Ok((StatusCode::CREATED, axum::Json(member)).into_response())
}

/// Remove a member from a team
#[utoipa::path(
    delete,
    path = "/api/teams/{id}/members/{member_id}",
    tag = TEAM_TAG,
    params(
        ("id" = i32, Path, description = "Team lead ID"),
        ("member_id" = i32, Path, description = "Team member ID"),
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 404, description = "Member not found in this team", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_team_member(
    State(state): State<AppState>,
    Path((id, member_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    TeamService::new(&state.db)
        .remove_member(id, member_id)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// List a team's assignments, newest first
#[utoipa::path(
    get,
    path = "/api/teams/{id}/assignments",
    tag = TEAM_TAG,
    params(("id" = i32, Path, description = "Team lead ID")),
    responses(
        (status = 200, description = "Team assignments", body = Vec<AssignmentDto>),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_team_assignments(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let assignments = AssignmentService::new(&state.db).list_for_team(id).await?;

    Ok((StatusCode::OK, axum::Json(assignments)).into_response())
}
