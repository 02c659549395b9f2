//! Tests for rescue team endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use floodwatch::{
    model::{
        api::ErrorDto,
        camp::CampDto,
        team::{CreateTeamDto, CreateTeamMemberDto, TeamDto, TeamFilter},
    },
    server::controller::{
        camp::list_camps,
        team::{add_team_member, create_team, delete_team, list_teams, remove_team_member},
    },
};

use super::*;

fn member(name: &str, phone: &str) -> CreateTeamMemberDto {
    CreateTeamMemberDto {
        full_name: name.to_string(),
        phone_number: phone.to_string(),
    }
}

/// Expect a team to be created together with its members
#[tokio::test]
async fn create_with_members() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;

    let resp = create_team(
        State(test.into_app_state()),
        Json(CreateTeamDto {
            full_name: "Anil Kumar".to_string(),
            phone_number: "9447012345".to_string(),
            designation: "Fire & Rescue".to_string(),
            subdivision_id: 1,
            members: vec![
                member("Suresh", "9447000001"),
                member("Fathima", "9447000002"),
            ],
            ..Default::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let team: TeamDto = json_body(resp).await;
    assert_eq!(team.members.len(), 2);
    assert!(team.members.iter().all(|m| m.team_lead_id == team.id));

    Ok(())
}

/// Expect 400 on the subdivision field for a team in an unknown subdivision
#[tokio::test]
async fn create_in_unknown_subdivision() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;

    let resp = create_team(
        State(test.into_app_state()),
        Json(CreateTeamDto {
            full_name: "Anil Kumar".to_string(),
            phone_number: "9447012345".to_string(),
            subdivision_id: 42,
            ..Default::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDto = json_body(resp).await;
    assert_eq!(error.field.as_deref(), Some("subdivision_id"));

    Ok(())
}

/// Expect a member to be removable only through the team that owns it
#[tokio::test]
async fn member_belongs_to_team() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .with_team("Anil Kumar", 1)
        .with_team("Meera Nair", 1)
        .build()
        .await?;

    let added = add_team_member(
        State(test.into_app_state()),
        Path(1),
        Json(member("Suresh", "9447000001")),
    )
    .await
    .into_response();
    assert_eq!(added.status(), StatusCode::CREATED);

    let wrong_team = remove_team_member(State(test.into_app_state()), Path((2, 1)))
        .await
        .into_response();
    let right_team = remove_team_member(State(test.into_app_state()), Path((1, 1)))
        .await
        .into_response();

    assert_eq!(wrong_team.status(), StatusCode::NOT_FOUND);
    assert_eq!(right_team.status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Expect deleting a team to remove its members and keep its camps without an owner
#[tokio::test]
async fn delete_cascades() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .with_team("Anil Kumar", 1)
        .build()
        .await?;
    test.relief().insert_team_member(1, "Suresh").await?;
    test.relief().insert_team_member(1, "Fathima").await?;
    let camp = test
        .relief()
        .insert_camp(1, "Govt. HSS Aluva", 100, 0, None)
        .await?;
    {
        use sea_orm::{ActiveModelTrait, ActiveValue, IntoActiveModel};

        let mut am = camp.into_active_model();
        am.team_lead_id = ActiveValue::Set(Some(1));
        am.update(&test.db).await?;
    }

    let deleted = delete_team(State(test.into_app_state()), Path(1))
        .await
        .into_response();
    let again = delete_team(State(test.into_app_state()), Path(1))
        .await
        .into_response();

    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let teams = list_teams(State(test.into_app_state()), Query(TeamFilter::default()))
        .await
        .into_response();
    let teams: Vec<TeamDto> = json_body(teams).await;
    assert!(teams.is_empty());

    {
        use sea_orm::{EntityTrait, PaginatorTrait};

        let members = entity::prelude::TeamMember::find().count(&test.db).await?;
        assert_eq!(members, 0);
    }

    let camps = list_camps(State(test.into_app_state()), Query(Default::default()))
        .await
        .into_response();
    let camps: Vec<CampDto> = json_body(camps).await;
    assert_eq!(camps.len(), 1);
    assert_eq!(camps[0].team_lead_id, None);

    Ok(())
}
