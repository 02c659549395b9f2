use chrono::Utc;
use entity::sea_orm_active_enums::{ProviderType, ResourceStatus, ResourceType};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::db::ResourceModel;

#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
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
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceFilter {
    pub subdivision_id: Option<i32>,
    pub resource_type: Option<ResourceType>,
    pub status: Option<ResourceStatus>,
}

pub struct ResourceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ResourceRepository<'a, C> {
    /// Creates a new instance of [`ResourceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn insert(&self, resource: NewResource) -> Result<ResourceModel, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::Resource::insert(entity::resource::ActiveModel {
            team_lead_id: ActiveValue::Set(resource.team_lead_id),
            subdivision_id: ActiveValue::Set(resource.subdivision_id),
            name: ActiveValue::Set(resource.name),
            resource_type: ActiveValue::Set(resource.resource_type),
            quantity: ActiveValue::Set(resource.quantity),
            unit: ActiveValue::Set(resource.unit),
            low_threshold: ActiveValue::Set(resource.low_threshold),
            provider_name: ActiveValue::Set(resource.provider_name),
            provider_type: ActiveValue::Set(resource.provider_type),
            contact_number: ActiveValue::Set(resource.contact_number),
            location: ActiveValue::Set(resource.location),
            latitude: ActiveValue::Set(resource.latitude),
            longitude: ActiveValue::Set(resource.longitude),
            notes: ActiveValue::Set(resource.notes),
            status: ActiveValue::Set(resource.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<ResourceModel>, DbErr> {
        entity::prelude::Resource::find_by_id(id).one(self.db).await
    }

    /// Lists resources newest first
    pub async fn select(&self, filter: ResourceFilter) -> Result<Vec<ResourceModel>, DbErr> {
        use entity::resource::Column;

        let mut query = entity::prelude::Resource::find();

        if let Some(subdivision_id) = filter.subdivision_id {
            query = query.filter(Column::SubdivisionId.eq(subdivision_id));
        }

        if let Some(resource_type) = filter.resource_type {
            query = query.filter(Column::ResourceType.eq(resource_type));
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

    /// Writes every editable column of the given resource back to its row
    pub async fn update(&self, resource: ResourceModel) -> Result<ResourceModel, DbErr> {
        let mut resource_am = resource.clone().into_active_model();
        resource_am.team_lead_id = ActiveValue::Set(resource.team_lead_id);
        resource_am.subdivision_id = ActiveValue::Set(resource.subdivision_id);
        resource_am.name = ActiveValue::Set(resource.name);
        resource_am.resource_type = ActiveValue::Set(resource.resource_type);
        resource_am.quantity = ActiveValue::Set(resource.quantity);
        resource_am.unit = ActiveValue::Set(resource.unit);
        resource_am.low_threshold = ActiveValue::Set(resource.low_threshold);
        resource_am.provider_name = ActiveValue::Set(resource.provider_name);
        resource_am.provider_type = ActiveValue::Set(resource.provider_type);
        resource_am.contact_number = ActiveValue::Set(resource.contact_number);
        resource_am.location = ActiveValue::Set(resource.location);
        resource_am.latitude = ActiveValue::Set(resource.latitude);
        resource_am.longitude = ActiveValue::Set(resource.longitude);
        resource_am.notes = ActiveValue::Set(resource.notes);
        resource_am.status = ActiveValue::Set(resource.status);
        resource_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        resource_am.update(self.db).await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Resource::delete_by_id(id).exec(self.db).await
    }

    /// Clears the owning team from every resource it manages
    pub async fn detach_team(&self, team_lead_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Resource::update_many()
            .set(entity::resource::ActiveModel {
                team_lead_id: ActiveValue::Set(None),
                ..Default::default()
            })
            .filter(entity::resource::Column::TeamLeadId.eq(team_lead_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod select {
        use floodwatch_test_utils::prelude::*;

        use super::*;

        /// Expect the type, status and subdivision filters to combine
        #[tokio::test]
        async fn combines_filters() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_relief_tables()
                .with_subdivision("Ernakulam", "Aluva")
                .with_subdivision("Ernakulam", "Kochi")
                .build()
                .await?;

            test.relief().insert_resource(1, "Rice", 500, None).await?;
            test.relief().insert_resource(1, "Biscuits", 5, None).await?;
            test.relief().insert_resource(2, "Dal", 0, None).await?;

            let repo = ResourceRepository::new(&test.db);
            let low_in_aluva = repo
                .select(ResourceFilter {
                    subdivision_id: Some(1),
                    resource_type: Some(ResourceType::Food),
                    status: Some(ResourceStatus::Low),
                })
                .await?;
            let medical = repo
                .select(ResourceFilter {
                    resource_type: Some(ResourceType::Medical),
                    ..Default::default()
                })
                .await?;

            assert_eq!(low_in_aluva.len(), 1);
            assert_eq!(low_in_aluva[0].name, "Biscuits");
            assert!(medical.is_empty());

            Ok(())
        }
    }

    mod detach_team {
        use floodwatch_test_utils::prelude::*;

        use super::*;

        /// Expect resources to survive with no owner after detaching
        #[tokio::test]
        async fn clears_owner() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_relief_tables()
                .with_subdivision("Ernakulam", "Aluva")
                .with_team("Anil Kumar", 1)
                .build()
                .await?;
            let mut rice = test.relief().insert_resource(1, "Rice", 500, None).await?;
            rice.team_lead_id = Some(1);

            let repo = ResourceRepository::new(&test.db);
            repo.update(rice.clone()).await?;
            let affected = repo.detach_team(1).await?;
            let stored = repo.get(rice.id).await?.expect("resource should exist");

            assert_eq!(affected, 1);
            assert_eq!(stored.team_lead_id, None);

            Ok(())
        }
    }
}
