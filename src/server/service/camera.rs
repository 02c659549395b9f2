//! Camera configuration management.
//!
//! Deletes are not immediate: a deleted camera is hidden and can be restored until its
//! undo deadline, after which [`CameraService::purge_expired`] removes it for good.

use chrono::{Duration, NaiveDateTime, Utc};
use dioxus_logger::tracing;
use entity::sea_orm_active_enums::{FeedType, RescueCameraStatus, WaterLevelCameraStatus};
use sea_orm::DatabaseConnection;

use crate::{
    model::camera::{
        decode_feed_config, CameraDto, CameraFilter, CameraKind, CreateRescueCameraDto, CreateWaterLevelCameraDto,
        FeedConfigDto, PendingDeleteDto, RescueCameraDto, RoiDto, UpdateRescueCameraDto,
        UpdateWaterLevelCameraDto, WaterLevelCameraDto, WaterLevelReadingDto,
    },
    server::{
        data::camera::{
            NewRescueCamera, NewWaterLevelCamera, RescueCameraRepository,
            WaterLevelCameraRepository,
        },
        error::{relief::ReliefError, validation::ValidationError, Error},
        service::{retry::RetryContext, validate},
    },
};

/// Checks that the config carries the key the feed type connects with.
///
/// Blank values are dropped before the check.
pub fn validate_feed_config(
    feed_type: FeedType,
    config: FeedConfigDto,
) -> Result<serde_json::Value, ValidationError> {
    let config = FeedConfigDto {
        device_id: validate::optional_text(config.device_id),
        qr_code: validate::optional_text(config.qr_code),
        url: validate::optional_text(config.url),
    };

    let (field, present) = match feed_type {
        FeedType::Rtsp => ("config.url", config.url.is_some()),
        FeedType::Webcam => ("config.device_id", config.device_id.is_some()),
        FeedType::Phone => ("config.qr_code", config.qr_code.is_some()),
    };

    if !present {
        return Err(ValidationError::new(
            field,
            format!("{field} is required for this feed type"),
        ));
    }

    Ok(serde_json::json!(config))
}

/// Checks the ROI rectangle and the millimetre calibration of a water-level camera.
pub fn validate_calibration(
    roi: RoiDto,
    min_value: i32,
    max_value: i32,
    threshold: i32,
) -> Result<(), ValidationError> {
    if roi.x1 >= roi.x2 || roi.y1 >= roi.y2 {
        return Err(ValidationError::new(
            "roi_coords",
            "roi_coords must satisfy x1 < x2 and y1 < y2",
        ));
    }

    if min_value >= max_value {
        return Err(ValidationError::new(
            "max_value",
            "max_value must be greater than min_value",
        ));
    }

    if !(min_value..=max_value).contains(&threshold) {
        return Err(ValidationError::new(
            "threshold",
            "threshold must be between min_value and max_value",
        ));
    }

    Ok(())
}

fn not_found(kind: CameraKind, id: i32) -> ReliefError {
    let record = match kind {
        CameraKind::Rescue => "Rescue camera",
        CameraKind::WaterLevel => "Water-level camera",
    };

    ReliefError::NotFound { record, id }
}

pub struct CameraService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CameraService<'a> {
    /// Creates a new instance of [`CameraService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists rescue cameras that are not pending deletion
    pub async fn list_rescue(&self, filter: CameraFilter) -> Result<Vec<RescueCameraDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let subdivision_id = filter.subdivision_id;

        ctx.execute_with_retry("list rescue cameras", |_| {
            let db = db.clone();

            Box::pin(async move {
                let cameras = RescueCameraRepository::new(&db)
                    .select_visible(subdivision_id)
                    .await?;

                cameras.into_iter().map(RescueCameraDto::try_from).collect()
            })
        })
        .await
    }

    pub async fn create_rescue(
        &self,
        dto: CreateRescueCameraDto,
    ) -> Result<RescueCameraDto, Error> {
        let location_name = validate::required_text("location_name", &dto.location_name)?;
        let feed_type: FeedType = dto.feed_type.into();
        let config = validate_feed_config(feed_type, dto.config)?;
        validate::owner_exists(self.db, Some(dto.subdivision_id), dto.team_lead_id).await?;

        let camera = RescueCameraRepository::new(self.db)
            .insert(NewRescueCamera {
                team_lead_id: dto.team_lead_id,
                subdivision_id: dto.subdivision_id,
                location_name,
                feed_type,
                config,
                status: dto
                    .status
                    .map(Into::into)
                    .unwrap_or(RescueCameraStatus::Offline),
            })
            .await?;

        tracing::info!("Created rescue camera ID {}", camera.id);

        camera.try_into()
    }

    /// Applies a partial update; the feed config is re-checked against the resulting feed type
    pub async fn update_rescue(
        &self,
        id: i32,
        dto: UpdateRescueCameraDto,
    ) -> Result<RescueCameraDto, Error> {
        let repo = RescueCameraRepository::new(self.db);
        let mut camera = repo
            .get_visible(id)
            .await?
            .ok_or(not_found(CameraKind::Rescue, id))?;

        if let Some(location_name) = dto.location_name {
            camera.location_name = validate::required_text("location_name", &location_name)?;
        }
        if let Some(status) = dto.status {
            camera.status = status.into();
        }

        if dto.feed_type.is_some() || dto.config.is_some() {
            let feed_type = dto.feed_type.map(Into::into).unwrap_or(camera.feed_type);
            let config = match dto.config {
                Some(config) => config,
                None => decode_feed_config(&camera)?,
            };

            camera.config = validate_feed_config(feed_type, config)?;
            camera.feed_type = feed_type;
        }

        repo.update(camera).await?.try_into()
    }

    /// Lists water-level cameras that are not pending deletion
    pub async fn list_water_level(&self) -> Result<Vec<WaterLevelCameraDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();

        ctx.execute_with_retry("list water-level cameras", |_| {
            let db = db.clone();

            Box::pin(async move {
                let cameras = WaterLevelCameraRepository::new(&db).select_visible().await?;

                Ok(cameras.into_iter().map(WaterLevelCameraDto::from).collect())
            })
        })
        .await
    }

    pub async fn create_water_level(
        &self,
        dto: CreateWaterLevelCameraDto,
    ) -> Result<WaterLevelCameraDto, Error> {
        let name = validate::required_text("name", &dto.name)?;
        validate_calibration(dto.roi_coords, dto.min_value, dto.max_value, dto.threshold)?;

        let roi = dto.roi_coords;
        let camera = WaterLevelCameraRepository::new(self.db)
            .insert(NewWaterLevelCamera {
                name,
                roi: (roi.x1, roi.y1, roi.x2, roi.y2),
                min_value: dto.min_value,
                max_value: dto.max_value,
                threshold: dto.threshold,
                status: dto
                    .status
                    .map(Into::into)
                    .unwrap_or(WaterLevelCameraStatus::Active),
            })
            .await?;

        tracing::info!("Created water-level camera ID {}", camera.id);

        Ok(camera.into())
    }

    /// Applies a partial update; calibration is re-checked as a whole
    ///
    /// A stored reading that falls outside the new range is cleared.
    pub async fn update_water_level(
        &self,
        id: i32,
        dto: UpdateWaterLevelCameraDto,
    ) -> Result<WaterLevelCameraDto, Error> {
        let repo = WaterLevelCameraRepository::new(self.db);
        let mut camera = repo
            .get_visible(id)
            .await?
            .ok_or(not_found(CameraKind::WaterLevel, id))?;

        if let Some(name) = dto.name {
            camera.name = validate::required_text("name", &name)?;
        }
        if let Some(status) = dto.status {
            camera.status = status.into();
        }
        if let Some(roi) = dto.roi_coords {
            camera.roi_x1 = roi.x1;
            camera.roi_y1 = roi.y1;
            camera.roi_x2 = roi.x2;
            camera.roi_y2 = roi.y2;
        }
        camera.min_value = dto.min_value.unwrap_or(camera.min_value);
        camera.max_value = dto.max_value.unwrap_or(camera.max_value);
        camera.threshold = dto.threshold.unwrap_or(camera.threshold);

        validate_calibration(
            RoiDto {
                x1: camera.roi_x1,
                y1: camera.roi_y1,
                x2: camera.roi_x2,
                y2: camera.roi_y2,
            },
            camera.min_value,
            camera.max_value,
            camera.threshold,
        )?;

        // A reading taken under the old calibration is only kept while it is still on scale
        if camera
            .current_level
            .is_some_and(|level| !(camera.min_value..=camera.max_value).contains(&level))
        {
            tracing::info!(
                "Cleared off-scale reading of water-level camera ID {} after recalibration",
                camera.id
            );
            camera.current_level = None;
        }

        Ok(repo.update(camera).await?.into())
    }

    /// Records the latest measured level, which must lie within the calibrated range
    pub async fn record_reading(
        &self,
        id: i32,
        dto: WaterLevelReadingDto,
    ) -> Result<WaterLevelCameraDto, Error> {
        let repo = WaterLevelCameraRepository::new(self.db);
        let mut camera = repo
            .get_visible(id)
            .await?
            .ok_or(not_found(CameraKind::WaterLevel, id))?;

        if !(camera.min_value..=camera.max_value).contains(&dto.current_level) {
            return Err(ValidationError::new(
                "current_level",
                format!(
                    "current_level must be between {} and {}",
                    camera.min_value, camera.max_value
                ),
            )
            .into());
        }

        camera.current_level = Some(dto.current_level);
        let camera = repo.update(camera).await?;

        if camera.current_level.is_some_and(|level| level >= camera.threshold) {
            tracing::warn!(
                "Water-level camera ID {} ({}) reading {} mm reached threshold {} mm",
                camera.id,
                camera.name,
                dto.current_level,
                camera.threshold
            );
        }

        Ok(camera.into())
    }

    /// Hides a camera and schedules it for purging once `undo_window` has elapsed
    ///
    /// # Returns
    /// - `Ok(PendingDeleteDto)` - Deadline until which the delete can be undone
    /// - `Err(Error::ReliefError)` - Camera missing or already pending deletion
    /// - `Err(Error::InternalError)` - Deadline not representable
    pub async fn delete(
        &self,
        kind: CameraKind,
        id: i32,
        undo_window: Duration,
    ) -> Result<PendingDeleteDto, Error> {
        let undo_until = Utc::now()
            .naive_utc()
            .checked_add_signed(undo_window)
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "Undo window of {}s overflows the camera purge deadline",
                    undo_window.num_seconds()
                ))
            })?;

        let marked = match kind {
            CameraKind::Rescue => RescueCameraRepository::new(self.db)
                .mark_pending_delete(id, undo_until)
                .await?
                .is_some(),
            CameraKind::WaterLevel => WaterLevelCameraRepository::new(self.db)
                .mark_pending_delete(id, undo_until)
                .await?
                .is_some(),
        };

        if !marked {
            return Err(not_found(kind, id).into());
        }

        tracing::info!("Scheduled {} camera ID {} for deletion at {}", kind, id, undo_until);

        Ok(PendingDeleteDto {
            id,
            kind,
            undo_until,
        })
    }

    /// Cancels a pending delete while its undo window is open
    pub async fn restore(&self, kind: CameraKind, id: i32) -> Result<CameraDto, Error> {
        let now = Utc::now().naive_utc();

        let restored = match kind {
            CameraKind::Rescue => RescueCameraRepository::new(self.db)
                .restore(id, now)
                .await?
                .map(|camera| camera.try_into().map(CameraDto::Rescue))
                .transpose()?,
            CameraKind::WaterLevel => WaterLevelCameraRepository::new(self.db)
                .restore(id, now)
                .await?
                .map(|camera| CameraDto::WaterLevel(camera.into())),
        };

        restored.ok_or_else(|| not_found(kind, id).into())
    }

    /// Permanently deletes cameras whose undo window closed at or before `now`
    ///
    /// Returns the number of purged cameras.
    pub async fn purge_expired(&self, now: NaiveDateTime) -> Result<u64, Error> {
        let rescue = RescueCameraRepository::new(self.db)
            .purge_expired(now)
            .await?;
        let water_level = WaterLevelCameraRepository::new(self.db)
            .purge_expired(now)
            .await?;

        Ok(rescue + water_level)
    }
}
