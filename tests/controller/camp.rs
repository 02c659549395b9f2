//! Tests for relief camp endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use floodwatch::{
    model::{
        api::ErrorDto,
        camp::{CampDto, CampFilter, CampStatus, CampStatusUpdateDto, CreateCampDto, OccupancyUpdateDto},
    },
    server::controller::camp::{
        create_camp, delete_camp, list_camps, update_camp_occupancy, update_camp_status,
    },
};

use super::*;

/// Expect a new camp at capacity to be stored as full
#[tokio::test]
async fn create_derives_status() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;

    let resp = create_camp(
        State(test.into_app_state()),
        Json(CreateCampDto {
            subdivision_id: 1,
            name: "Govt. HSS Aluva".to_string(),
            location: "Aluva".to_string(),
            capacity: 120,
            current_occupancy: 120,
            facilities: vec!["water".to_string(), "medical".to_string()],
            ..Default::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let camp: CampDto = json_body(resp).await;
    assert_eq!(camp.status, CampStatus::Full);
    assert_eq!(camp.facilities, vec!["water", "medical"]);

    Ok(())
}

/// Expect occupancy above capacity or below zero to be rejected without changing the camp
#[tokio::test]
async fn occupancy_stays_within_capacity() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;
    let camp = test
        .relief()
        .insert_camp(1, "St. Mary's School", 50, 40, None)
        .await?;

    let over = update_camp_occupancy(
        State(test.into_app_state()),
        Path(camp.id),
        Json(OccupancyUpdateDto {
            occupancy: None,
            change: Some(11),
        }),
    )
    .await
    .into_response();
    let under = update_camp_occupancy(
        State(test.into_app_state()),
        Path(camp.id),
        Json(OccupancyUpdateDto {
            occupancy: Some(-1),
            change: None,
        }),
    )
    .await
    .into_response();
    let filled = update_camp_occupancy(
        State(test.into_app_state()),
        Path(camp.id),
        Json(OccupancyUpdateDto {
            occupancy: None,
            change: Some(10),
        }),
    )
    .await
    .into_response();

    assert_eq!(over.status(), StatusCode::BAD_REQUEST);
    assert_eq!(under.status(), StatusCode::BAD_REQUEST);
    let over: ErrorDto = json_body(over).await;
    assert_eq!(over.field.as_deref(), Some("change"));

    assert_eq!(filled.status(), StatusCode::OK);
    let filled: CampDto = json_body(filled).await;
    assert_eq!(filled.current_occupancy, 50);
    assert_eq!(filled.status, CampStatus::Full);

    Ok(())
}

/// Expect a closed camp to stay closed through occupancy changes and to reopen as active
#[tokio::test]
async fn close_and_reopen() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;
    let camp = test
        .relief()
        .insert_camp(1, "Town Hall", 200, 10, None)
        .await?;

    let closed = update_camp_status(
        State(test.into_app_state()),
        Path(camp.id),
        Json(CampStatusUpdateDto { closed: true }),
    )
    .await
    .into_response();
    let changed = update_camp_occupancy(
        State(test.into_app_state()),
        Path(camp.id),
        Json(OccupancyUpdateDto {
            occupancy: Some(5),
            change: None,
        }),
    )
    .await
    .into_response();
    let reopened = update_camp_status(
        State(test.into_app_state()),
        Path(camp.id),
        Json(CampStatusUpdateDto { closed: false }),
    )
    .await
    .into_response();

    let closed: CampDto = json_body(closed).await;
    let changed: CampDto = json_body(changed).await;
    let reopened: CampDto = json_body(reopened).await;
    assert_eq!(closed.status, CampStatus::Closed);
    assert_eq!(changed.status, CampStatus::Closed);
    assert_eq!(reopened.status, CampStatus::Active);

    let closed_camps = list_camps(
        State(test.into_app_state()),
        Query(CampFilter {
            status: Some(CampStatus::Closed),
            ..Default::default()
        }),
    )
    .await
    .into_response();
    let closed_camps: Vec<CampDto> = json_body(closed_camps).await;
    assert!(closed_camps.is_empty());

    Ok(())
}

/// Expect 204 on delete and 404 when deleting again
#[tokio::test]
async fn delete_twice() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Thrissur", "Chalakudy")
        .build()
        .await?;
    let camp = test
        .relief()
        .insert_camp(1, "Parish Hall", 80, 0, None)
        .await?;

    let first = delete_camp(State(test.into_app_state()), Path(camp.id))
        .await
        .into_response();
    let second = delete_camp(State(test.into_app_state()), Path(camp.id))
        .await
        .into_response();

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    Ok(())
}
