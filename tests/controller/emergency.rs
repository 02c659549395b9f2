//! Tests for SOS intake, listing and resolution endpoints.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use floodwatch::{
    model::{
        api::ErrorDto,
        emergency::{CreateEmergencyDto, EmergencyDto, EmergencyFilter, RequestStatus},
    },
    server::controller::emergency::{
        list_emergencies, resolve_emergency, submit_emergency, IDEMPOTENCY_KEY_HEADER,
    },
};

use super::*;

fn periyar_bridge() -> CreateEmergencyDto {
    CreateEmergencyDto {
        location: "Periyar Bridge".to_string(),
        description: "Stranded family, 4 people".to_string(),
        latitude: Some("9.9312".to_string()),
        longitude: Some("76.2673".to_string()),
        ..Default::default()
    }
}

fn with_key(key: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(IDEMPOTENCY_KEY_HEADER, HeaderValue::from_static(key));
    headers
}

/// Expect 201 with a pending record carrying a generated id and a timestamp not in the future
#[tokio::test]
async fn submit_stores_pending_request() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let before = chrono::Utc::now().naive_utc();

    let resp = submit_emergency(
        State(test.into_app_state()),
        HeaderMap::new(),
        Json(periyar_bridge()),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let request: EmergencyDto = json_body(resp).await;
    assert!(request.id > 0);
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.latitude, Some(9.9312));
    assert_eq!(request.longitude, Some(76.2673));
    assert!(request.timestamp >= before - chrono::Duration::seconds(1));
    assert!(request.timestamp <= chrono::Utc::now().naive_utc());

    Ok(())
}

/// Expect re-sending with the same key to return 200 and the original record
#[tokio::test]
async fn resubmit_with_same_key_returns_original() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;

    let first = submit_emergency(
        State(test.into_app_state()),
        with_key("sos-7f3a"),
        Json(periyar_bridge()),
    )
    .await
    .into_response();
    let second = submit_emergency(
        State(test.into_app_state()),
        with_key("sos-7f3a"),
        Json(periyar_bridge()),
    )
    .await
    .into_response();

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::OK);
    let first: EmergencyDto = json_body(first).await;
    let second: EmergencyDto = json_body(second).await;
    assert_eq!(first, second);

    let listed = list_emergencies(
        State(test.into_app_state()),
        Query(EmergencyFilter::default()),
    )
    .await
    .into_response();
    let listed: Vec<EmergencyDto> = json_body(listed).await;
    assert_eq!(listed.len(), 1);

    Ok(())
}

/// Expect 400 naming the field for a blank location and for a half coordinate pair
#[tokio::test]
async fn invalid_submission_names_field() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;

    let blank_location = submit_emergency(
        State(test.into_app_state()),
        HeaderMap::new(),
        Json(CreateEmergencyDto {
            location: "   ".to_string(),
            ..periyar_bridge()
        }),
    )
    .await
    .into_response();
    let half_pair = submit_emergency(
        State(test.into_app_state()),
        HeaderMap::new(),
        Json(CreateEmergencyDto {
            longitude: None,
            ..periyar_bridge()
        }),
    )
    .await
    .into_response();

    assert_eq!(blank_location.status(), StatusCode::BAD_REQUEST);
    assert_eq!(half_pair.status(), StatusCode::BAD_REQUEST);
    let blank_location: ErrorDto = json_body(blank_location).await;
    let half_pair: ErrorDto = json_body(half_pair).await;
    assert_eq!(blank_location.field.as_deref(), Some("location"));
    assert_eq!(half_pair.field.as_deref(), Some("longitude"));

    Ok(())
}

/// Expect resolve to move the request out of the pending filter and 404 for unknown ids
#[tokio::test]
async fn resolve_request() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let request = test
        .relief()
        .insert_emergency("Aluva Market", None, None)
        .await?;

    let resolved = resolve_emergency(State(test.into_app_state()), Path(request.id))
        .await
        .into_response();
    let missing = resolve_emergency(State(test.into_app_state()), Path(request.id + 1))
        .await
        .into_response();

    assert_eq!(resolved.status(), StatusCode::OK);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let resolved: EmergencyDto = json_body(resolved).await;
    assert_eq!(resolved.status, RequestStatus::Resolved);
    assert!(resolved.resolved_at.is_some());

    let pending = list_emergencies(
        State(test.into_app_state()),
        Query(EmergencyFilter {
            status: Some(RequestStatus::Pending),
            ..Default::default()
        }),
    )
    .await
    .into_response();
    let pending: Vec<EmergencyDto> = json_body(pending).await;
    assert!(pending.is_empty());

    Ok(())
}
