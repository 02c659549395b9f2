//! Rescue and water-level camera repositories.
//!
//! Deleting a camera is two-phase. `mark_pending_delete` stamps the row with the
//! deadline until which it can be restored, hiding it from every `*_visible` read.
//! Rows whose deadline has passed are removed by `purge_expired`, which the
//! scheduler runs periodically.

use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::{FeedType, RescueCameraStatus, WaterLevelCameraStatus};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::db::{RescueCameraModel, WaterLevelCameraModel};

#[derive(Debug, Clone, PartialEq)]
pub struct NewRescueCamera {
    pub team_lead_id: Option<i32>,
    pub subdivision_id: i32,
    pub location_name: String,
    pub feed_type: FeedType,
    pub config: serde_json::Value,
    pub status: RescueCameraStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWaterLevelCamera {
    pub name: String,
    pub roi: (i32, i32, i32, i32),
    pub min_value: i32,
    pub max_value: i32,
    pub threshold: i32,
    pub status: WaterLevelCameraStatus,
}

pub struct RescueCameraRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RescueCameraRepository<'a, C> {
    /// Creates a new instance of [`RescueCameraRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn insert(&self, camera: NewRescueCamera) -> Result<RescueCameraModel, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::RescueCamera::insert(entity::rescue_camera::ActiveModel {
            team_lead_id: ActiveValue::Set(camera.team_lead_id),
            subdivision_id: ActiveValue::Set(camera.subdivision_id),
            location_name: ActiveValue::Set(camera.location_name),
            feed_type: ActiveValue::Set(camera.feed_type),
            config: ActiveValue::Set(camera.config),
            status: ActiveValue::Set(camera.status),
            pending_delete_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Lists cameras that are not pending deletion
    pub async fn select_visible(
        &self,
        subdivision_id: Option<i32>,
    ) -> Result<Vec<RescueCameraModel>, DbErr> {
        use entity::rescue_camera::Column;

        let mut query = entity::prelude::RescueCamera::find()
            .filter(Column::PendingDeleteAt.is_null());

        if let Some(subdivision_id) = subdivision_id {
            query = query.filter(Column::SubdivisionId.eq(subdivision_id));
        }

        query.order_by_asc(Column::Id).all(self.db).await
    }

    pub async fn get_visible(&self, id: i32) -> Result<Option<RescueCameraModel>, DbErr> {
        entity::prelude::RescueCamera::find_by_id(id)
            .filter(entity::rescue_camera::Column::PendingDeleteAt.is_null())
            .one(self.db)
            .await
    }

    /// Writes every editable column of the given camera back to its row
    pub async fn update(&self, camera: RescueCameraModel) -> Result<RescueCameraModel, DbErr> {
        let mut camera_am = camera.clone().into_active_model();
        camera_am.team_lead_id = ActiveValue::Set(camera.team_lead_id);
        camera_am.subdivision_id = ActiveValue::Set(camera.subdivision_id);
        camera_am.location_name = ActiveValue::Set(camera.location_name);
        camera_am.feed_type = ActiveValue::Set(camera.feed_type);
        camera_am.config = ActiveValue::Set(camera.config);
        camera_am.status = ActiveValue::Set(camera.status);
        camera_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        camera_am.update(self.db).await
    }

    /// Hides a visible camera until `undo_until`
    ///
    /// Returns `None` if the camera does not exist or is already pending deletion.
    pub async fn mark_pending_delete(
        &self,
        id: i32,
        undo_until: NaiveDateTime,
    ) -> Result<Option<RescueCameraModel>, DbErr> {
        use entity::rescue_camera::Column;

        let result = entity::prelude::RescueCamera::update_many()
            .col_expr(Column::PendingDeleteAt, Expr::value(Some(undo_until)))
            .filter(Column::Id.eq(id))
            .filter(Column::PendingDeleteAt.is_null())
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        entity::prelude::RescueCamera::find_by_id(id).one(self.db).await
    }

    /// Clears the pending deletion of a camera whose undo window is still open
    ///
    /// Returns `None` if there is nothing to restore.
    pub async fn restore(
        &self,
        id: i32,
        now: NaiveDateTime,
    ) -> Result<Option<RescueCameraModel>, DbErr> {
        use entity::rescue_camera::Column;

        let result = entity::prelude::RescueCamera::update_many()
            .col_expr(Column::PendingDeleteAt, Expr::value(Option::<NaiveDateTime>::None))
            .filter(Column::Id.eq(id))
            .filter(Column::PendingDeleteAt.gt(now))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_visible(id).await
    }

    /// Permanently deletes cameras whose undo window closed at or before `now`
    pub async fn purge_expired(&self, now: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::RescueCamera::delete_many()
            .filter(entity::rescue_camera::Column::PendingDeleteAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Clears the owning team from every camera it manages
    pub async fn detach_team(&self, team_lead_id: i32) -> Result<u64, DbErr> {
        use entity::rescue_camera::Column;

        let result = entity::prelude::RescueCamera::update_many()
            .col_expr(Column::TeamLeadId, Expr::value(Option::<i32>::None))
            .filter(Column::TeamLeadId.eq(team_lead_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

pub struct WaterLevelCameraRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WaterLevelCameraRepository<'a, C> {
    /// Creates a new instance of [`WaterLevelCameraRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        camera: NewWaterLevelCamera,
    ) -> Result<WaterLevelCameraModel, DbErr> {
        let now = Utc::now().naive_utc();
        let (x1, y1, x2, y2) = camera.roi;

        entity::prelude::WaterLevelCamera::insert(entity::water_level_camera::ActiveModel {
            name: ActiveValue::Set(camera.name),
            roi_x1: ActiveValue::Set(x1),
            roi_y1: ActiveValue::Set(y1),
            roi_x2: ActiveValue::Set(x2),
            roi_y2: ActiveValue::Set(y2),
            min_value: ActiveValue::Set(camera.min_value),
            max_value: ActiveValue::Set(camera.max_value),
            threshold: ActiveValue::Set(camera.threshold),
            current_level: ActiveValue::Set(None),
            status: ActiveValue::Set(camera.status),
            pending_delete_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn select_visible(&self) -> Result<Vec<WaterLevelCameraModel>, DbErr> {
        use entity::water_level_camera::Column;

        entity::prelude::WaterLevelCamera::find()
            .filter(Column::PendingDeleteAt.is_null())
            .order_by_asc(Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_visible(&self, id: i32) -> Result<Option<WaterLevelCameraModel>, DbErr> {
        entity::prelude::WaterLevelCamera::find_by_id(id)
            .filter(entity::water_level_camera::Column::PendingDeleteAt.is_null())
            .one(self.db)
            .await
    }

    /// Writes every editable column of the given camera back to its row
    pub async fn update(
        &self,
        camera: WaterLevelCameraModel,
    ) -> Result<WaterLevelCameraModel, DbErr> {
        let mut camera_am = camera.clone().into_active_model();
        camera_am.name = ActiveValue::Set(camera.name);
        camera_am.roi_x1 = ActiveValue::Set(camera.roi_x1);
        camera_am.roi_y1 = ActiveValue::Set(camera.roi_y1);
        camera_am.roi_x2 = ActiveValue::Set(camera.roi_x2);
        camera_am.roi_y2 = ActiveValue::Set(camera.roi_y2);
        camera_am.min_value = ActiveValue::Set(camera.min_value);
        camera_am.max_value = ActiveValue::Set(camera.max_value);
        camera_am.threshold = ActiveValue::Set(camera.threshold);
        camera_am.current_level = ActiveValue::Set(camera.current_level);
        camera_am.status = ActiveValue::Set(camera.status);
        camera_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        camera_am.update(self.db).await
    }

    /// Hides a visible camera until `undo_until`
    ///
    /// Returns `None` if the camera does not exist or is already pending deletion.
    pub async fn mark_pending_delete(
        &self,
        id: i32,
        undo_until: NaiveDateTime,
    ) -> Result<Option<WaterLevelCameraModel>, DbErr> {
        use entity::water_level_camera::Column;

        let result = entity::prelude::WaterLevelCamera::update_many()
            .col_expr(Column::PendingDeleteAt, Expr::value(Some(undo_until)))
            .filter(Column::Id.eq(id))
            .filter(Column::PendingDeleteAt.is_null())
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        entity::prelude::WaterLevelCamera::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Clears the pending deletion of a camera whose undo window is still open
    ///
    /// Returns `None` if there is nothing to restore.
    pub async fn restore(
        &self,
        id: i32,
        now: NaiveDateTime,
    ) -> Result<Option<WaterLevelCameraModel>, DbErr> {
        use entity::water_level_camera::Column;

        let result = entity::prelude::WaterLevelCamera::update_many()
            .col_expr(Column::PendingDeleteAt, Expr::value(Option::<NaiveDateTime>::None))
            .filter(Column::Id.eq(id))
            .filter(Column::PendingDeleteAt.gt(now))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_visible(id).await
    }

    /// Permanently deletes cameras whose undo window closed at or before `now`
    pub async fn purge_expired(&self, now: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::WaterLevelCamera::delete_many()
            .filter(entity::water_level_camera::Column::PendingDeleteAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    mod pending_delete {
        use floodwatch_test_utils::prelude::*;

        use super::*;

        /// Expect a marked camera to disappear from visible reads and a second mark to fail
        #[tokio::test]
        async fn hides_camera_once() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_relief_tables()
                .with_subdivision("Ernakulam", "Aluva")
                .build()
                .await?;
            let camera = test.relief().insert_rescue_camera(1, None).await?;

            let repo = RescueCameraRepository::new(&test.db);
            let until = Utc::now().naive_utc() + Duration::seconds(30);
            let marked = repo.mark_pending_delete(camera.id, until).await?;
            let second = repo.mark_pending_delete(camera.id, until).await?;

            assert_eq!(marked.and_then(|c| c.pending_delete_at), Some(until));
            assert!(second.is_none());
            assert!(repo.get_visible(camera.id).await?.is_none());
            assert!(repo.select_visible(None).await?.is_empty());

            Ok(())
        }

        /// Expect restore to succeed only while the undo window is open
        #[tokio::test]
        async fn restores_within_window() -> Result<(), TestError> {
            let test = test_setup_with_relief_tables!()?;
            let open = test.relief().insert_water_level_camera("Aluva Bridge").await?;
            let closed = test.relief().insert_water_level_camera("Kalady Weir").await?;

            let repo = WaterLevelCameraRepository::new(&test.db);
            let now = Utc::now().naive_utc();
            repo.mark_pending_delete(open.id, now + Duration::seconds(30))
                .await?;
            repo.mark_pending_delete(closed.id, now - Duration::seconds(1))
                .await?;

            let restored = repo.restore(open.id, now).await?;
            let expired = repo.restore(closed.id, now).await?;

            assert_eq!(restored.map(|c| c.id), Some(open.id));
            assert!(expired.is_none());

            Ok(())
        }
    }

    mod purge_expired {
        use floodwatch_test_utils::prelude::*;

        use super::*;

        /// Expect only cameras past their deadline to be removed
        #[tokio::test]
        async fn removes_expired_rows_only() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_relief_tables()
                .with_subdivision("Ernakulam", "Aluva")
                .build()
                .await?;
            let expired = test.relief().insert_rescue_camera(1, None).await?;
            let pending = test.relief().insert_rescue_camera(1, None).await?;
            let live = test.relief().insert_rescue_camera(1, None).await?;

            let repo = RescueCameraRepository::new(&test.db);
            let now = Utc::now().naive_utc();
            repo.mark_pending_delete(expired.id, now - Duration::seconds(5))
                .await?;
            repo.mark_pending_delete(pending.id, now + Duration::seconds(30))
                .await?;

            let purged = repo.purge_expired(now).await?;

            assert_eq!(purged, 1);
            assert!(repo.restore(pending.id, now).await?.is_some());
            assert!(repo.get_visible(live.id).await?.is_some());

            Ok(())
        }
    }
}
