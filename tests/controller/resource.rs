//! Tests for relief resource endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use floodwatch::{
    model::{
        api::ErrorDto,
        resource::{
            CreateResourceDto, ProviderType, ResourceDto, ResourceFilter, ResourceStatus,
            ResourceType, UpdateResourceDto,
        },
    },
    server::controller::resource::{
        create_resource, delete_resource, list_resources, update_resource,
    },
};

use super::*;

fn drinking_water(quantity: i32) -> CreateResourceDto {
    CreateResourceDto {
        team_lead_id: None,
        subdivision_id: 1,
        name: "Drinking water".to_string(),
        resource_type: ResourceType::Food,
        quantity,
        unit: "litres".to_string(),
        low_threshold: 50,
        provider_name: "Kerala Water Authority".to_string(),
        provider_type: ProviderType::Company,
        contact_number: "9400000010".to_string(),
        location: "Aluva Pump House".to_string(),
        latitude: Some(10.1004),
        longitude: Some(76.3570),
        notes: None,
    }
}

/// Expect a new resource at or under its threshold to be stored as low
#[tokio::test]
async fn create_derives_status() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;

    let low = create_resource(State(test.into_app_state()), Json(drinking_water(40)))
        .await
        .into_response();
    let stocked = create_resource(State(test.into_app_state()), Json(drinking_water(500)))
        .await
        .into_response();

    assert_eq!(low.status(), StatusCode::CREATED);
    assert_eq!(stocked.status(), StatusCode::CREATED);
    let low: ResourceDto = json_body(low).await;
    let stocked: ResourceDto = json_body(stocked).await;
    assert_eq!(low.status, ResourceStatus::Low);
    assert_eq!(stocked.status, ResourceStatus::Available);

    let listed = list_resources(
        State(test.into_app_state()),
        Query(ResourceFilter {
            status: Some(ResourceStatus::Low),
            ..Default::default()
        }),
    )
    .await
    .into_response();
    let listed: Vec<ResourceDto> = json_body(listed).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, low.id);

    Ok(())
}

/// Expect a quantity change to recompute status
#[tokio::test]
async fn update_recomputes_status() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;
    let rice = test
        .relief()
        .insert_resource(1, "Rice", 200, None)
        .await?;

    let depleted = update_resource(
        State(test.into_app_state()),
        Path(rice.id),
        Json(UpdateResourceDto {
            quantity: Some(0),
            ..Default::default()
        }),
    )
    .await
    .into_response();
    let restocked = update_resource(
        State(test.into_app_state()),
        Path(rice.id),
        Json(UpdateResourceDto {
            quantity: Some(8),
            ..Default::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(depleted.status(), StatusCode::OK);
    let depleted: ResourceDto = json_body(depleted).await;
    let restocked: ResourceDto = json_body(restocked).await;
    assert_eq!(depleted.status, ResourceStatus::Unavailable);
    assert_eq!(restocked.quantity, 8);
    assert_eq!(restocked.status, ResourceStatus::Low);

    Ok(())
}

/// Expect a negative quantity to be rejected naming the field, on create and update
#[tokio::test]
async fn negative_quantity_is_bad_request() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;
    let rice = test
        .relief()
        .insert_resource(1, "Rice", 200, None)
        .await?;

    let created = create_resource(State(test.into_app_state()), Json(drinking_water(-5)))
        .await
        .into_response();
    let updated = update_resource(
        State(test.into_app_state()),
        Path(rice.id),
        Json(UpdateResourceDto {
            quantity: Some(-1),
            ..Default::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(created.status(), StatusCode::BAD_REQUEST);
    assert_eq!(updated.status(), StatusCode::BAD_REQUEST);
    let created: ErrorDto = json_body(created).await;
    let updated: ErrorDto = json_body(updated).await;
    assert_eq!(created.field.as_deref(), Some("quantity"));
    assert_eq!(updated.field.as_deref(), Some("quantity"));

    Ok(())
}

/// Expect 204 on delete, then 404 for a second delete and for an update
#[tokio::test]
async fn delete_twice() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Thrissur", "Chalakudy")
        .build()
        .await?;
    let rice = test
        .relief()
        .insert_resource(1, "Rice", 200, None)
        .await?;

    let first = delete_resource(State(test.into_app_state()), Path(rice.id))
        .await
        .into_response();
    let second = delete_resource(State(test.into_app_state()), Path(rice.id))
        .await
        .into_response();
    let update = update_resource(
        State(test.into_app_state()),
        Path(rice.id),
        Json(UpdateResourceDto::default()),
    )
    .await
    .into_response();

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    Ok(())
}
