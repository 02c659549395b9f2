//! Tests for camera configuration endpoints and the deletion undo window.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use floodwatch::{
    model::{
        api::ErrorDto,
        camera::{
            CameraDto, CameraFilter, CameraKind, CreateRescueCameraDto, FeedConfigDto, FeedType,
            PendingDeleteDto, RescueCameraDto, RescueCameraStatus, UpdateRescueCameraDto,
            WaterLevelCameraDto, WaterLevelReadingDto,
        },
    },
    server::controller::camera::{
        create_rescue_camera, delete_rescue_camera, delete_water_level_camera,
        list_rescue_cameras, list_water_level_cameras, record_water_level_reading,
        restore_rescue_camera, update_rescue_camera,
    },
};

use super::*;

/// Expect a webcam without a device id to be rejected on the config field
#[tokio::test]
async fn create_validates_feed_config() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;

    let invalid = create_rescue_camera(
        State(test.into_app_state()),
        Json(CreateRescueCameraDto {
            team_lead_id: None,
            subdivision_id: 1,
            location_name: "Aluva Shiva Temple".to_string(),
            feed_type: FeedType::Webcam,
            config: FeedConfigDto {
                url: Some("rtsp://10.0.0.5:554/stream".to_string()),
                ..Default::default()
            },
            status: None,
        }),
    )
    .await
    .into_response();
    let valid = create_rescue_camera(
        State(test.into_app_state()),
        Json(CreateRescueCameraDto {
            team_lead_id: None,
            subdivision_id: 1,
            location_name: "Aluva Shiva Temple".to_string(),
            feed_type: FeedType::Webcam,
            config: FeedConfigDto {
                device_id: Some("cam-0".to_string()),
                ..Default::default()
            },
            status: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDto = json_body(invalid).await;
    assert_eq!(error.field.as_deref(), Some("config.device_id"));

    assert_eq!(valid.status(), StatusCode::CREATED);
    let camera: RescueCameraDto = json_body(valid).await;
    assert_eq!(camera.status, RescueCameraStatus::Offline);

    Ok(())
}

/// Expect switching the feed type to be checked against the stored config
#[tokio::test]
async fn update_revalidates_feed_type() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;
    let camera = test.relief().insert_rescue_camera(1, None).await?;

    let resp = update_rescue_camera(
        State(test.into_app_state()),
        Path(camera.id),
        Json(UpdateRescueCameraDto {
            feed_type: Some(FeedType::Phone),
            ..Default::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDto = json_body(resp).await;
    assert_eq!(error.field.as_deref(), Some("config.qr_code"));

    Ok(())
}

/// Expect delete to hide the camera, a second delete to be 404 and restore to bring it back
#[tokio::test]
async fn delete_twice_then_restore() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_relief_tables()
        .with_subdivision("Ernakulam", "Aluva")
        .build()
        .await?;
    let camera = test.relief().insert_rescue_camera(1, None).await?;

    let first = delete_rescue_camera(State(test.into_app_state()), Path(camera.id))
        .await
        .into_response();
    let second = delete_rescue_camera(State(test.into_app_state()), Path(camera.id))
        .await
        .into_response();

    assert_eq!(first.status(), StatusCode::ACCEPTED);
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    let pending: PendingDeleteDto = json_body(first).await;
    assert_eq!(pending.kind, CameraKind::Rescue);
    assert!(pending.undo_until > chrono::Utc::now().naive_utc());

    let hidden = list_rescue_cameras(
        State(test.into_app_state()),
        Query(CameraFilter::default()),
    )
    .await
    .into_response();
    let hidden: Vec<RescueCameraDto> = json_body(hidden).await;
    assert!(hidden.is_empty());

    let restored = restore_rescue_camera(State(test.into_app_state()), Path(camera.id))
        .await
        .into_response();
    assert_eq!(restored.status(), StatusCode::OK);
    let restored: CameraDto = json_body(restored).await;
    assert!(matches!(restored, CameraDto::Rescue(c) if c.id == camera.id));

    Ok(())
}

/// Expect a water-level camera unknown to the server to be 404 on delete
#[tokio::test]
async fn delete_missing_water_level_camera() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;

    let resp = delete_water_level_camera(State(test.into_app_state()), Path(1))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect readings at the threshold to be flagged and readings past the calibrated maximum rejected
#[tokio::test]
async fn record_readings() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let camera = test
        .relief()
        .insert_water_level_camera("Marthanda Varma Bridge")
        .await?;

    let at_threshold = record_water_level_reading(
        State(test.into_app_state()),
        Path(camera.id),
        Json(WaterLevelReadingDto {
            current_level: 3000,
        }),
    )
    .await
    .into_response();
    let past_max = record_water_level_reading(
        State(test.into_app_state()),
        Path(camera.id),
        Json(WaterLevelReadingDto {
            current_level: 5001,
        }),
    )
    .await
    .into_response();

    assert_eq!(at_threshold.status(), StatusCode::OK);
    let updated: WaterLevelCameraDto = json_body(at_threshold).await;
    assert_eq!(updated.current_level, Some(3000));
    assert!(updated.above_threshold);
    assert_eq!(past_max.status(), StatusCode::BAD_REQUEST);

    let listed = list_water_level_cameras(State(test.into_app_state()))
        .await
        .into_response();
    let listed: Vec<WaterLevelCameraDto> = json_body(listed).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].current_level, Some(3000));

    Ok(())
}
