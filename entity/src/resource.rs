use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{ProviderType, ResourceStatus, ResourceType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resource")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub team_lead_id: Option<i32>,
    pub subdivision_id: i32,
    pub name: String,
    pub resource_type: ResourceType,
    pub quantity: i32,
    pub unit: String,
    pub low_threshold: i32,
    pub provider_name: String,
    pub provider_type: ProviderType,
    pub contact_number: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
    pub status: ResourceStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subdivision::Entity",
        from = "Column::SubdivisionId",
        to = "super::subdivision::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Subdivision,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamLeadId",
        to = "super::team::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Team,
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

impl ActiveModelBehavior for ActiveModel {}
