use chrono::Utc;
use entity::sea_orm_active_enums::CampStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::db::CampModel;

#[derive(Debug, Clone, PartialEq)]
pub struct NewCamp {
    pub team_lead_id: Option<i32>,
    pub subdivision_id: i32,
    pub name: String,
    pub location: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: i32,
    pub current_occupancy: i32,
    pub status: CampStatus,
    pub contact_number: String,
    pub facilities: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CampFilter {
    pub subdivision_id: Option<i32>,
    pub status: Option<CampStatus>,
}

pub struct CampRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CampRepository<'a, C> {
    /// Creates a new instance of [`CampRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn insert(&self, camp: NewCamp) -> Result<CampModel, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::Camp::insert(entity::camp::ActiveModel {
            team_lead_id: ActiveValue::Set(camp.team_lead_id),
            subdivision_id: ActiveValue::Set(camp.subdivision_id),
            name: ActiveValue::Set(camp.name),
            location: ActiveValue::Set(camp.location),
            address: ActiveValue::Set(camp.address),
            latitude: ActiveValue::Set(camp.latitude),
            longitude: ActiveValue::Set(camp.longitude),
            capacity: ActiveValue::Set(camp.capacity),
            current_occupancy: ActiveValue::Set(camp.current_occupancy),
            status: ActiveValue::Set(camp.status),
            contact_number: ActiveValue::Set(camp.contact_number),
            facilities: ActiveValue::Set(serde_json::json!(camp.facilities)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<CampModel>, DbErr> {
        entity::prelude::Camp::find_by_id(id).one(self.db).await
    }

    /// Reads a camp and holds a row lock on it until the surrounding transaction ends
    ///
    /// Backends without row locks (SQLite) serialize writers on the database instead.
    pub async fn get_for_update(&self, id: i32) -> Result<Option<CampModel>, DbErr> {
        entity::prelude::Camp::find_by_id(id)
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Lists camps newest first
    pub async fn select(&self, filter: CampFilter) -> Result<Vec<CampModel>, DbErr> {
        use entity::camp::Column;

        let mut query = entity::prelude::Camp::find();

        if let Some(subdivision_id) = filter.subdivision_id {
            query = query.filter(Column::SubdivisionId.eq(subdivision_id));
        }

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }

        query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db)
            .await
    }

    /// Writes every editable column of the given camp back to its row
    pub async fn update(&self, camp: CampModel) -> Result<CampModel, DbErr> {
        let mut camp_am = camp.clone().into_active_model();
        camp_am.team_lead_id = ActiveValue::Set(camp.team_lead_id);
        camp_am.subdivision_id = ActiveValue::Set(camp.subdivision_id);
        camp_am.name = ActiveValue::Set(camp.name);
        camp_am.location = ActiveValue::Set(camp.location);
        camp_am.address = ActiveValue::Set(camp.address);
        camp_am.latitude = ActiveValue::Set(camp.latitude);
        camp_am.longitude = ActiveValue::Set(camp.longitude);
        camp_am.capacity = ActiveValue::Set(camp.capacity);
        camp_am.current_occupancy = ActiveValue::Set(camp.current_occupancy);
        camp_am.status = ActiveValue::Set(camp.status);
        camp_am.contact_number = ActiveValue::Set(camp.contact_number);
        camp_am.facilities = ActiveValue::Set(camp.facilities);
        camp_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        camp_am.update(self.db).await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Camp::delete_by_id(id).exec(self.db).await
    }

    /// Clears the owning team from every camp it manages
    pub async fn detach_team(&self, team_lead_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Camp::update_many()
            .set(entity::camp::ActiveModel {
                team_lead_id: ActiveValue::Set(None),
                ..Default::default()
            })
            .filter(entity::camp::Column::TeamLeadId.eq(team_lead_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
