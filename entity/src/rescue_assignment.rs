use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::AssignmentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rescue_assignment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub emergency_request_id: i32,
    pub team_lead_id: i32,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub assigned_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::emergency_request::Entity",
        from = "Column::EmergencyRequestId",
        to = "super::emergency_request::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    EmergencyRequest,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamLeadId",
        to = "super::team::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Team,
}

impl Related<super::emergency_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmergencyRequest.def()
    }
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
