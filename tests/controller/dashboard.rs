//! Tests for the dashboard snapshot, map overlay and reference endpoints.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use floodwatch::{
    model::{
        dashboard::{DashboardDto, DashboardFilter},
        emergency::{CreateEmergencyDto, EmergencyDto},
        map::{MapDto, MapFilter, MarkerKind},
        subdivision::SubdivisionDto,
        water_level::WaterLevelDto,
    },
    server::controller::{
        dashboard::{get_dashboard, get_map},
        emergency::submit_emergency,
        reference::{list_subdivisions, list_water_levels},
    },
};

use super::*;

/// Expect a submitted SOS to appear in the next dashboard fetch and as a red alert marker
#[tokio::test]
async fn periyar_bridge_reaches_dashboard_and_map() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;

    let submitted = submit_emergency(
        State(test.into_app_state()),
        HeaderMap::new(),
        Json(CreateEmergencyDto {
            location: "Periyar Bridge".to_string(),
            description: "Stranded family, 4 people".to_string(),
            latitude: Some("9.9312".to_string()),
            longitude: Some("76.2673".to_string()),
            ..Default::default()
        }),
    )
    .await
    .into_response();
    let submitted: EmergencyDto = json_body(submitted).await;

    let dashboard = get_dashboard(
        State(test.into_app_state()),
        Query(DashboardFilter::default()),
    )
    .await
    .into_response();
    assert_eq!(dashboard.status(), StatusCode::OK);
    let dashboard: DashboardDto = json_body(dashboard).await;
    assert_eq!(dashboard.emergencies, vec![submitted.clone()]);
    assert!(dashboard.fetched_at >= submitted.timestamp);
    assert_eq!(dashboard.refresh_interval_secs, 30);

    let map = get_map(State(test.into_app_state()), Query(MapFilter::default()))
        .await
        .into_response();
    assert_eq!(map.status(), StatusCode::OK);
    let map: MapDto = json_body(map).await;
    assert_eq!(map.markers.len(), 1);
    let marker = &map.markers[0];
    assert_eq!(marker.kind, MarkerKind::Alert);
    assert_eq!(marker.record_id, submitted.id);
    assert_eq!(marker.badge, "ALERT");
    assert_eq!(marker.color, "red");
    assert_eq!((marker.latitude, marker.longitude), (9.9312, 76.2673));

    Ok(())
}

/// Expect records without coordinates to be listed as skipped rather than placed
#[tokio::test]
async fn map_skips_unlocated_records() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;
    test.relief()
        .insert_camp(1, "Govt. HSS Aluva", 100, 10, Some((10.1076, 76.3516)))
        .await?;
    test.relief()
        .insert_resource(1, "Rice", 0, None)
        .await?;

    let map = get_map(
        State(test.into_app_state()),
        Query(MapFilter {
            subdivision_id: Some(1),
        }),
    )
    .await
    .into_response();
    let map: MapDto = json_body(map).await;

    assert_eq!(map.markers.len(), 1);
    assert_eq!(map.markers[0].kind, MarkerKind::Camp);
    assert_eq!(map.skipped.len(), 1);
    assert_eq!(map.skipped[0].kind, MarkerKind::Resource);
    assert_eq!((map.view.latitude, map.view.longitude, map.view.zoom), (10.8505, 76.2711, 8));
    assert!(map.attribution.contains("OpenStreetMap"));

    Ok(())
}

/// Expect subdivisions with district names and the static reservoir list
#[tokio::test]
async fn reference_data() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .with_subdivision("Idukki", "Thodupuzha")
        .build()
        .await?;

    let subdivisions = list_subdivisions(State(test.into_app_state()))
        .await
        .into_response();
    let subdivisions: Vec<SubdivisionDto> = json_body(subdivisions).await;
    assert_eq!(subdivisions.len(), 2);
    assert!(subdivisions
        .iter()
        .any(|s| s.name == "Thodupuzha" && s.district_name == "Idukki"));

    let levels = list_water_levels().await.into_response();
    let levels: Vec<WaterLevelDto> = json_body(levels).await;
    assert!(levels.iter().any(|l| l.dam_name == "Idukki"));

    Ok(())
}
