use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::WaterLevelCameraStatus;

/// Calibration values are stored in millimetres, ROI corners in pixels.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "water_level_camera")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub roi_x1: i32,
    pub roi_y1: i32,
    pub roi_x2: i32,
    pub roi_y2: i32,
    pub min_value: i32,
    pub max_value: i32,
    pub threshold: i32,
    pub current_level: Option<i32>,
    pub status: WaterLevelCameraStatus,
    pub pending_delete_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
