use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Which camera table a generic camera route addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum CameraKind {
    Rescue,
    WaterLevel,
}

impl std::fmt::Display for CameraKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rescue => write!(f, "rescue"),
            Self::WaterLevel => write!(f, "water-level"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum FeedType {
    Rtsp,
    Webcam,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RescueCameraStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum WaterLevelCameraStatus {
    Active,
    Inactive,
    Error,
}

/// Connection settings for a rescue camera feed; which key is required depends on the feed type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct FeedConfigDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RescueCameraDto {
    pub id: i32,
    pub team_lead_id: Option<i32>,
    pub subdivision_id: i32,
    pub location_name: String,
    pub feed_type: FeedType,
    pub config: FeedConfigDto,
    pub status: RescueCameraStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateRescueCameraDto {
    pub team_lead_id: Option<i32>,
    pub subdivision_id: i32,
    #[serde(default)]
    pub location_name: String,
    pub feed_type: FeedType,
    #[serde(default)]
    pub config: FeedConfigDto,
    pub status: Option<RescueCameraStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct UpdateRescueCameraDto {
    pub location_name: Option<String>,
    pub feed_type: Option<FeedType>,
    pub config: Option<FeedConfigDto>,
    pub status: Option<RescueCameraStatus>,
}

/// Region of interest in frame pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RoiDto {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Calibration values (`min_value`, `max_value`, `threshold`, `current_level`) are millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct WaterLevelCameraDto {
    pub id: i32,
    pub name: String,
    pub roi_coords: RoiDto,
    pub min_value: i32,
    pub max_value: i32,
    pub threshold: i32,
    pub current_level: Option<i32>,
    /// True once the last reading reached the alert threshold
    pub above_threshold: bool,
    pub status: WaterLevelCameraStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateWaterLevelCameraDto {
    #[serde(default)]
    pub name: String,
    pub roi_coords: RoiDto,
    pub min_value: i32,
    pub max_value: i32,
    pub threshold: i32,
    pub status: Option<WaterLevelCameraStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct UpdateWaterLevelCameraDto {
    pub name: Option<String>,
    pub roi_coords: Option<RoiDto>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
    pub threshold: Option<i32>,
    pub status: Option<WaterLevelCameraStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct WaterLevelReadingDto {
    pub current_level: i32,
}

/// Returned when a camera delete is accepted; the row can be restored until `undo_until`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct PendingDeleteDto {
    pub id: i32,
    pub kind: CameraKind,
    pub undo_until: NaiveDateTime,
}

/// A camera of either kind, as returned by routes that take the kind as a path segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum CameraDto {
    Rescue(RescueCameraDto),
    WaterLevel(WaterLevelCameraDto),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct CameraFilter {
    pub subdivision_id: Option<i32>,
}

#[cfg(feature = "server")]
pub use convert::decode_feed_config;

#[cfg(feature = "server")]
mod convert {
    use entity::sea_orm_active_enums as db;

    use super::*;
    use crate::{model::mirror_active_enum, server::error::Error};

    mirror_active_enum!(FeedType, db::FeedType, [Rtsp, Webcam, Phone]);
    mirror_active_enum!(
        RescueCameraStatus,
        db::RescueCameraStatus,
        [Online, Offline]
    );
    mirror_active_enum!(
        WaterLevelCameraStatus,
        db::WaterLevelCameraStatus,
        [Active, Inactive, Error]
    );

    impl TryFrom<entity::rescue_camera::Model> for RescueCameraDto {
        type Error = Error;

        /// Fails when the stored feed config is not a config object
        fn try_from(model: entity::rescue_camera::Model) -> Result<Self, Self::Error> {
            let config = decode_feed_config(&model)?;

            Ok(Self {
                id: model.id,
                team_lead_id: model.team_lead_id,
                subdivision_id: model.subdivision_id,
                location_name: model.location_name,
                feed_type: model.feed_type.into(),
                config,
                status: model.status.into(),
                created_at: model.created_at,
                updated_at: model.updated_at,
            })
        }
    }

    /// Decodes the JSON feed config stored on a rescue camera row
    pub fn decode_feed_config(
        model: &entity::rescue_camera::Model,
    ) -> Result<FeedConfigDto, Error> {
        serde_json::from_value(model.config.clone()).map_err(|e| {
            Error::InternalError(format!(
                "Failed to decode feed config of rescue camera ID {}: {}",
                model.id, e
            ))
        })
    }

    impl From<entity::water_level_camera::Model> for WaterLevelCameraDto {
        fn from(model: entity::water_level_camera::Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                roi_coords: RoiDto {
                    x1: model.roi_x1,
                    y1: model.roi_y1,
                    x2: model.roi_x2,
                    y2: model.roi_y2,
                },
                min_value: model.min_value,
                max_value: model.max_value,
                threshold: model.threshold,
                current_level: model.current_level,
                above_threshold: model
                    .current_level
                    .is_some_and(|level| level >= model.threshold),
                status: model.status.into(),
                created_at: model.created_at,
                updated_at: model.updated_at,
            }
        }
    }
}
