use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    model::resource::{CreateResourceDto, ResourceDto, ResourceFilter, UpdateResourceDto},
    server::{
        data::resource::{self, NewResource, ResourceRepository},
        error::{relief::ReliefError, Error},
        service::{retry::RetryContext, status::derive_resource_status, validate},
    },
};

fn not_found(id: i32) -> ReliefError {
    ReliefError::NotFound {
        record: "Resource",
        id,
    }
}

pub struct ResourceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResourceService<'a> {
    /// Creates a new instance of [`ResourceService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: ResourceFilter) -> Result<Vec<ResourceDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let filter = resource::ResourceFilter {
            subdivision_id: filter.subdivision_id,
            resource_type: filter.resource_type.map(Into::into),
            status: filter.status.map(Into::into),
        };

        ctx.execute_with_retry("list resources", |_| {
            let db = db.clone();

            Box::pin(async move {
                let resources = ResourceRepository::new(&db).select(filter).await?;

                Ok(resources.into_iter().map(ResourceDto::from).collect())
            })
        })
        .await
    }

    pub async fn create(&self, dto: CreateResourceDto) -> Result<ResourceDto, Error> {
        let name = validate::required_text("name", &dto.name)?;
        let quantity = validate::non_negative("quantity", dto.quantity)?;
        let low_threshold = validate::non_negative("low_threshold", dto.low_threshold)?;
        let coordinates = validate::coordinates(dto.latitude, dto.longitude)?;
        validate::owner_exists(self.db, Some(dto.subdivision_id), dto.team_lead_id).await?;

        let resource = ResourceRepository::new(self.db)
            .insert(NewResource {
                team_lead_id: dto.team_lead_id,
                subdivision_id: dto.subdivision_id,
                name,
                resource_type: dto.resource_type.into(),
                quantity,
                unit: dto.unit.trim().to_string(),
                low_threshold,
                provider_name: dto.provider_name.trim().to_string(),
                provider_type: dto.provider_type.into(),
                contact_number: dto.contact_number.trim().to_string(),
                location: dto.location.trim().to_string(),
                latitude: coordinates.map(|(lat, _)| lat),
                longitude: coordinates.map(|(_, long)| long),
                notes: validate::optional_text(dto.notes),
                status: derive_resource_status(quantity, low_threshold),
            })
            .await?;

        tracing::info!("Created resource ID {} ({})", resource.id, resource.name);

        Ok(resource.into())
    }

    /// Applies a partial update, recomputing the derived status
    pub async fn update(&self, id: i32, dto: UpdateResourceDto) -> Result<ResourceDto, Error> {
        let repo = ResourceRepository::new(self.db);
        let mut resource = repo.get(id).await?.ok_or(not_found(id))?;

        if let Some(name) = dto.name {
            resource.name = validate::required_text("name", &name)?;
        }
        if let Some(resource_type) = dto.resource_type {
            resource.resource_type = resource_type.into();
        }
        if let Some(quantity) = dto.quantity {
            resource.quantity = validate::non_negative("quantity", quantity)?;
        }
        if let Some(low_threshold) = dto.low_threshold {
            resource.low_threshold = validate::non_negative("low_threshold", low_threshold)?;
        }
        if let Some(unit) = dto.unit {
            resource.unit = unit.trim().to_string();
        }
        if let Some(provider_name) = dto.provider_name {
            resource.provider_name = provider_name.trim().to_string();
        }
        if let Some(provider_type) = dto.provider_type {
            resource.provider_type = provider_type.into();
        }
        if let Some(contact_number) = dto.contact_number {
            resource.contact_number = contact_number.trim().to_string();
        }
        if let Some(location) = dto.location {
            resource.location = location.trim().to_string();
        }
        if dto.notes.is_some() {
            resource.notes = validate::optional_text(dto.notes);
        }
        if dto.latitude.is_some() || dto.longitude.is_some() {
            let coordinates = validate::coordinates(dto.latitude, dto.longitude)?;
            resource.latitude = coordinates.map(|(lat, _)| lat);
            resource.longitude = coordinates.map(|(_, long)| long);
        }
        if let Some(team_lead_id) = dto.team_lead_id {
            validate::owner_exists(self.db, None, Some(team_lead_id)).await?;
            resource.team_lead_id = Some(team_lead_id);
        }

        resource.status = derive_resource_status(resource.quantity, resource.low_threshold);

        Ok(repo.update(resource).await?.into())
    }

    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        let result = ResourceRepository::new(self.db).delete(id).await?;

        if result.rows_affected == 0 {
            return Err(not_found(id).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use floodwatch_test_utils::prelude::*;

    use super::*;
    use crate::model::resource::{ProviderType, ResourceStatus, ResourceType};

    fn medicine_kits() -> CreateResourceDto {
        CreateResourceDto {
            team_lead_id: None,
            subdivision_id: 1,
            name: "First aid kits".to_string(),
            resource_type: ResourceType::Medical,
            quantity: 8,
            unit: "kits".to_string(),
            low_threshold: 10,
            provider_name: "Aluva Pharmacy".to_string(),
            provider_type: ProviderType::Shop,
            contact_number: "9400000003".to_string(),
            location: "Bank Junction".to_string(),
            latitude: None,
            longitude: None,
            notes: None,
        }
    }

    /// Expect status to be derived on create and recomputed on update
    #[tokio::test]
    async fn status_tracks_quantity() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_relief_tables()
            .with_subdivision("Ernakulam", "Aluva")
            .build()
            .await?;
        let service = ResourceService::new(&test.db);

        let created = service.create(medicine_kits()).await.unwrap();
        let restocked = service
            .update(
                created.id,
                UpdateResourceDto {
                    quantity: Some(60),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let depleted = service
            .update(
                created.id,
                UpdateResourceDto {
                    quantity: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(created.status, ResourceStatus::Low);
        assert_eq!(restocked.status, ResourceStatus::Available);
        assert_eq!(depleted.status, ResourceStatus::Unavailable);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_negative_quantity() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_relief_tables()
            .with_subdivision("Ernakulam", "Aluva")
            .build()
            .await?;
        let service = ResourceService::new(&test.db);

        let mut dto = medicine_kits();
        dto.quantity = -1;

        let result = service.create(dto).await;

        assert!(matches!(result, Err(Error::ValidationError(_))));

        Ok(())
    }
}
