use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "district")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subdivision::Entity")]
    Subdivision,
}

impl Related<super::subdivision::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subdivision.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
