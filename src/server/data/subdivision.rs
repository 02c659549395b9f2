use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder};

use crate::server::model::db::{DistrictModel, SubdivisionModel};

pub struct SubdivisionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubdivisionRepository<'a, C> {
    /// Creates a new instance of [`SubdivisionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Lists all subdivisions alongside their district, ordered by name
    pub async fn select_with_district(
        &self,
    ) -> Result<Vec<(SubdivisionModel, Option<DistrictModel>)>, DbErr> {
        entity::prelude::Subdivision::find()
            .find_also_related(entity::district::Entity)
            .order_by_asc(entity::subdivision::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<SubdivisionModel>, DbErr> {
        entity::prelude::Subdivision::find_by_id(id).one(self.db).await
    }
}
