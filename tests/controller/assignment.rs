//! Tests for dispatching requests to teams and the assignment lifecycle.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use floodwatch::{
    model::emergency::{
        AssignEmergencyDto, AssignmentDto, AssignmentStatus, EmergencyDto, EmergencyFilter,
        RequestStatus,
    },
    server::controller::{
        assignment::{accept_assignment, complete_assignment, reject_assignment},
        emergency::{assign_emergency, list_emergencies},
        team::list_team_assignments,
    },
};

use super::*;

fn to_team(team_lead_id: i32) -> Json<AssignEmergencyDto> {
    Json(AssignEmergencyDto {
        team_lead_id,
        notes: Some("Boat required".to_string()),
    })
}

/// Expect assign, accept and complete to resolve the request
#[tokio::test]
async fn assign_accept_complete() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .with_team("Anil Kumar", 1)
        .build()
        .await?;
    let request = test
        .relief()
        .insert_emergency("Periyar Bridge", Some((9.9312, 76.2673)), Some(1))
        .await?;

    let assigned = assign_emergency(State(test.into_app_state()), Path(request.id), to_team(1))
        .await
        .into_response();
    assert_eq!(assigned.status(), StatusCode::CREATED);
    let assignment: AssignmentDto = json_body(assigned).await;
    assert_eq!(assignment.status, AssignmentStatus::PendingAcceptance);

    let accepted = accept_assignment(State(test.into_app_state()), Path(assignment.id))
        .await
        .into_response();
    let completed = complete_assignment(State(test.into_app_state()), Path(assignment.id))
        .await
        .into_response();

    assert_eq!(accepted.status(), StatusCode::OK);
    assert_eq!(completed.status(), StatusCode::OK);
    let completed: AssignmentDto = json_body(completed).await;
    assert_eq!(completed.status, AssignmentStatus::Completed);

    let requests = list_emergencies(
        State(test.into_app_state()),
        Query(EmergencyFilter::default()),
    )
    .await
    .into_response();
    let requests: Vec<EmergencyDto> = json_body(requests).await;
    assert_eq!(requests[0].status, RequestStatus::Resolved);
    assert_eq!(
        requests[0].assignment_status,
        Some(AssignmentStatus::Completed)
    );

    Ok(())
}

/// Expect illegal transitions and double dispatch to be 409
#[tokio::test]
async fn illegal_transitions_conflict() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .with_team("Anil Kumar", 1)
        .with_team("Meera Nair", 1)
        .build()
        .await?;
    let request = test
        .relief()
        .insert_emergency("Kalamassery", None, Some(1))
        .await?;

    let assigned = assign_emergency(State(test.into_app_state()), Path(request.id), to_team(1))
        .await
        .into_response();
    let assignment: AssignmentDto = json_body(assigned).await;

    let complete_early = complete_assignment(State(test.into_app_state()), Path(assignment.id))
        .await
        .into_response();
    let double_dispatch =
        assign_emergency(State(test.into_app_state()), Path(request.id), to_team(2))
            .await
            .into_response();

    assert_eq!(complete_early.status(), StatusCode::CONFLICT);
    assert_eq!(double_dispatch.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Expect a rejected request to be dispatchable to another team
#[tokio::test]
async fn reject_allows_redispatch() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .with_team("Anil Kumar", 1)
        .with_team("Meera Nair", 1)
        .build()
        .await?;
    let request = test
        .relief()
        .insert_emergency("Eloor Ferry", None, Some(1))
        .await?;

    let assigned = assign_emergency(State(test.into_app_state()), Path(request.id), to_team(1))
        .await
        .into_response();
    let assignment: AssignmentDto = json_body(assigned).await;

    let rejected = reject_assignment(State(test.into_app_state()), Path(assignment.id))
        .await
        .into_response();
    let reassigned = assign_emergency(State(test.into_app_state()), Path(request.id), to_team(2))
        .await
        .into_response();

    assert_eq!(rejected.status(), StatusCode::OK);
    assert_eq!(reassigned.status(), StatusCode::CREATED);

    let first_team = list_team_assignments(State(test.into_app_state()), Path(1))
        .await
        .into_response();
    let first_team: Vec<AssignmentDto> = json_body(first_team).await;
    assert_eq!(first_team.len(), 1);
    assert_eq!(first_team[0].status, AssignmentStatus::Rejected);

    Ok(())
}

/// Expect 404 when dispatching to a team that does not exist
#[tokio::test]
async fn assign_to_unknown_team() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;
    let request = test
        .relief()
        .insert_emergency("Paravur", None, Some(1))
        .await?;

    let resp = assign_emergency(State(test.into_app_state()), Path(request.id), to_team(9))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
