use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{AssignmentStatus, RequestStatus, WaterDepth};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "emergency_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub location: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: RequestStatus,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub affected_people: Option<i32>,
    pub water_depth: Option<WaterDepth>,
    pub medical_needs: Option<String>,
    pub subdivision_id: Option<i32>,
    #[sea_orm(unique)]
    pub idempotency_key: Option<String>,
    pub assigned_team_id: Option<i32>,
    pub assignment_status: Option<AssignmentStatus>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub resolved_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subdivision::Entity",
        from = "Column::SubdivisionId",
        to = "super::subdivision::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Subdivision,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::AssignedTeamId",
        to = "super::team::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Team,
    #[sea_orm(has_many = "super::rescue_assignment::Entity")]
    RescueAssignment,
}

impl Related<super::subdivision::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subdivision.def()
    }
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::rescue_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RescueAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
