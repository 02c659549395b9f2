use dioxus_logger::tracing;
use entity::sea_orm_active_enums::CampStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::camp::{
        CampDto, CampFilter, CampStatusUpdateDto, CreateCampDto, OccupancyUpdateDto, UpdateCampDto,
    },
    server::{
        data::camp::{self, CampRepository, NewCamp},
        error::{relief::ReliefError, validation::ValidationError, Error},
        model::db::CampModel,
        service::{retry::RetryContext, status::derive_camp_status, validate},
    },
};

/// Checks capacity and headcount of a camp.
///
/// `occupancy_field` names the input the headcount came from, so an out of range
/// `change` is reported against `change` rather than `occupancy`.
fn check_occupancy(
    capacity: i32,
    current_occupancy: i32,
    occupancy_field: &'static str,
) -> Result<(), ValidationError> {
    if capacity < 1 {
        return Err(ValidationError::new(
            "capacity",
            "capacity must be at least 1",
        ));
    }

    if !(0..=capacity).contains(&current_occupancy) {
        return Err(ValidationError::new(
            occupancy_field,
            format!("occupancy must be between 0 and the camp capacity of {capacity}"),
        ));
    }

    Ok(())
}

fn not_found(id: i32) -> ReliefError {
    ReliefError::NotFound { record: "Camp", id }
}

pub struct CampService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CampService<'a> {
    /// Creates a new instance of [`CampService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: CampFilter) -> Result<Vec<CampDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let filter = camp::CampFilter {
            subdivision_id: filter.subdivision_id,
            status: filter.status.map(Into::into),
        };

        ctx.execute_with_retry("list camps", |_| {
            let db = db.clone();

            Box::pin(async move {
                let camps = CampRepository::new(&db).select(filter).await?;

                camps.into_iter().map(CampDto::try_from).collect()
            })
        })
        .await
    }

    pub async fn create(&self, dto: CreateCampDto) -> Result<CampDto, Error> {
        let name = validate::required_text("name", &dto.name)?;
        let location = validate::required_text("location", &dto.location)?;
        let coordinates = validate::coordinates(dto.latitude, dto.longitude)?;
        check_occupancy(dto.capacity, dto.current_occupancy, "current_occupancy")?;
        validate::owner_exists(self.db, Some(dto.subdivision_id), dto.team_lead_id).await?;

        let camp = CampRepository::new(self.db)
            .insert(NewCamp {
                team_lead_id: dto.team_lead_id,
                subdivision_id: dto.subdivision_id,
                name,
                location,
                address: dto.address.trim().to_string(),
                latitude: coordinates.map(|(lat, _)| lat),
                longitude: coordinates.map(|(_, long)| long),
                capacity: dto.capacity,
                current_occupancy: dto.current_occupancy,
                status: derive_camp_status(false, dto.capacity, dto.current_occupancy),
                contact_number: dto.contact_number.trim().to_string(),
                facilities: dto.facilities,
            })
            .await?;

        tracing::info!("Created camp ID {} ({})", camp.id, camp.name);

        camp.try_into()
    }

    /// Applies a partial update, recomputing the derived status
    pub async fn update(&self, id: i32, dto: UpdateCampDto) -> Result<CampDto, Error> {
        let repo = CampRepository::new(self.db);
        let mut camp = repo.get(id).await?.ok_or(not_found(id))?;

        if let Some(name) = dto.name {
            camp.name = validate::required_text("name", &name)?;
        }
        if let Some(location) = dto.location {
            camp.location = validate::required_text("location", &location)?;
        }
        if let Some(address) = dto.address {
            camp.address = address.trim().to_string();
        }
        if let Some(contact_number) = dto.contact_number {
            camp.contact_number = contact_number.trim().to_string();
        }
        if let Some(facilities) = dto.facilities {
            camp.facilities = serde_json::json!(facilities);
        }
        if dto.latitude.is_some() || dto.longitude.is_some() {
            let coordinates = validate::coordinates(dto.latitude, dto.longitude)?;
            camp.latitude = coordinates.map(|(lat, _)| lat);
            camp.longitude = coordinates.map(|(_, long)| long);
        }
        if let Some(team_lead_id) = dto.team_lead_id {
            validate::owner_exists(self.db, None, Some(team_lead_id)).await?;
            camp.team_lead_id = Some(team_lead_id);
        }

        camp.capacity = dto.capacity.unwrap_or(camp.capacity);
        camp.current_occupancy = dto.current_occupancy.unwrap_or(camp.current_occupancy);
        check_occupancy(camp.capacity, camp.current_occupancy, "current_occupancy")?;

        restate(&mut camp);

        repo.update(camp).await?.try_into()
    }

    /// Sets the headcount, either absolutely (`occupancy`) or relative to the
    /// stored value (`change`)
    ///
    /// The camp row is locked for the read, bounds check and write, so concurrent
    /// relative changes apply one after another instead of overwriting each other.
    pub async fn set_occupancy(
        &self,
        id: i32,
        dto: OccupancyUpdateDto,
    ) -> Result<CampDto, Error> {
        let txn = self.db.begin().await?;

        let repo = CampRepository::new(&txn);
        let mut camp = repo.get_for_update(id).await?.ok_or(not_found(id))?;

        let (occupancy, field) = match (dto.occupancy, dto.change) {
            (Some(occupancy), None) => (occupancy, "occupancy"),
            (None, Some(change)) => (camp.current_occupancy.saturating_add(change), "change"),
            _ => {
                return Err(ValidationError::new(
                    "occupancy",
                    "provide exactly one of occupancy or change",
                )
                .into())
            }
        };

        check_occupancy(camp.capacity, occupancy, field)?;

        camp.current_occupancy = occupancy;
        restate(&mut camp);

        let camp = repo.update(camp).await?;
        txn.commit().await?;

        tracing::debug!(
            "Camp ID {} occupancy {}/{}",
            camp.id,
            camp.current_occupancy,
            camp.capacity
        );

        camp.try_into()
    }

    /// Manually closes or reopens a camp
    pub async fn set_closed(&self, id: i32, dto: CampStatusUpdateDto) -> Result<CampDto, Error> {
        let repo = CampRepository::new(self.db);
        let mut camp = repo.get(id).await?.ok_or(not_found(id))?;

        camp.status = derive_camp_status(dto.closed, camp.capacity, camp.current_occupancy);

        repo.update(camp).await?.try_into()
    }

    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        let result = CampRepository::new(self.db).delete(id).await?;

        if result.rows_affected == 0 {
            return Err(not_found(id).into());
        }

        Ok(())
    }
}

/// Recomputes status, keeping a manually closed camp closed.
fn restate(camp: &mut CampModel) {
    camp.status = derive_camp_status(
        camp.status == CampStatus::Closed,
        camp.capacity,
        camp.current_occupancy,
    );
}

#[cfg(test)]
mod tests {
    use floodwatch_test_utils::prelude::*;

    use super::*;
    use crate::model::camp::CampStatus;

    async fn setup() -> Result<(TestContext, i32), TestError> {
        let test = TestBuilder::new()
            .with_relief_tables()
            .with_subdivision("Ernakulam", "Aluva")
            .build()
            .await?;
        let camp = test
            .relief()
            .insert_camp(1, "Aluva Govt School", 100, 90, Some((10.1076, 76.3516)))
            .await?;

        Ok((test, camp.id))
    }

    /// Expect relative changes to fill the camp and flip its status
    #[tokio::test]
    async fn change_fills_camp() -> Result<(), TestError> {
        let (test, id) = setup().await?;
        let service = CampService::new(&test.db);

        let camp = service
            .set_occupancy(
                id,
                OccupancyUpdateDto {
                    occupancy: None,
                    change: Some(10),
                },
            )
            .await
            .unwrap();

        assert_eq!(camp.current_occupancy, 100);
        assert_eq!(camp.status, CampStatus::Full);

        Ok(())
    }

    /// Expect concurrent relative changes to both apply
    #[tokio::test]
    async fn concurrent_changes_accumulate() -> Result<(), TestError> {
        let (test, id) = setup().await?;
        let service = CampService::new(&test.db);
        let change = |change| OccupancyUpdateDto {
            occupancy: None,
            change: Some(change),
        };

        let (first, second) = tokio::join!(
            service.set_occupancy(id, change(4)),
            service.set_occupancy(id, change(-7)),
        );
        let stored = CampRepository::new(&test.db).get(id).await?.unwrap();

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(stored.current_occupancy, 87);
        assert_eq!(stored.status, entity::sea_orm_active_enums::CampStatus::Active);

        Ok(())
    }

    /// Expect updates beyond capacity or below zero to be rejected and nothing written
    #[tokio::test]
    async fn occupancy_stays_within_capacity() -> Result<(), TestError> {
        let (test, id) = setup().await?;
        let service = CampService::new(&test.db);

        let over = service
            .set_occupancy(
                id,
                OccupancyUpdateDto {
                    occupancy: None,
                    change: Some(11),
                },
            )
            .await;
        let under = service
            .set_occupancy(
                id,
                OccupancyUpdateDto {
                    occupancy: Some(-1),
                    change: None,
                },
            )
            .await;
        let shrink = service
            .update(
                id,
                UpdateCampDto {
                    capacity: Some(50),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            over,
            Err(Error::ValidationError(ValidationError { field: "change", .. }))
        ));
        assert!(matches!(
            under,
            Err(Error::ValidationError(ValidationError { field: "occupancy", .. }))
        ));
        assert!(shrink.is_err());

        let stored = CampRepository::new(&test.db).get(id).await?.unwrap();
        assert_eq!(stored.current_occupancy, 90);
        assert_eq!(stored.capacity, 100);

        Ok(())
    }

    /// Expect a closed camp to stay closed through occupancy changes until reopened
    #[tokio::test]
    async fn closed_flag_survives_occupancy_changes() -> Result<(), TestError> {
        let (test, id) = setup().await?;
        let service = CampService::new(&test.db);

        service
            .set_closed(id, CampStatusUpdateDto { closed: true })
            .await
            .unwrap();
        let emptied = service
            .set_occupancy(
                id,
                OccupancyUpdateDto {
                    occupancy: Some(0),
                    change: None,
                },
            )
            .await
            .unwrap();
        let reopened = service
            .set_closed(id, CampStatusUpdateDto { closed: false })
            .await
            .unwrap();

        assert_eq!(emptied.status, CampStatus::Closed);
        assert_eq!(reopened.status, CampStatus::Active);

        Ok(())
    }

    #[tokio::test]
    async fn create_derives_status_and_checks_subdivision() -> Result<(), TestError> {
        let (test, _) = setup().await?;
        let service = CampService::new(&test.db);

        let dto = CreateCampDto {
            subdivision_id: 1,
            name: "St. Mary's Hall".to_string(),
            location: "Paravur".to_string(),
            capacity: 40,
            current_occupancy: 40,
            ..Default::default()
        };
        let created = service.create(dto.clone()).await.unwrap();
        let orphan = service
            .create(CreateCampDto {
                subdivision_id: 9,
                ..dto
            })
            .await;

        assert_eq!(created.status, CampStatus::Full);
        assert!(matches!(
            orphan,
            Err(Error::ValidationError(ValidationError { field: "subdivision_id", .. }))
        ));

        Ok(())
    }

    /// Expect a facilities column that is not a list to surface as an internal error
    #[tokio::test]
    async fn undecodable_facilities_is_internal_error() -> Result<(), TestError> {
        let (test, id) = setup().await?;
        let repo = CampRepository::new(&test.db);
        let mut camp = repo.get(id).await?.unwrap();
        camp.facilities = serde_json::json!("water, medical");
        repo.update(camp).await?;

        let service = CampService::new(&test.db);
        let listed = service.list(CampFilter::default()).await;
        let closed = service
            .set_closed(id, CampStatusUpdateDto { closed: true })
            .await;

        assert!(matches!(listed, Err(Error::InternalError(_))));
        assert!(matches!(closed, Err(Error::InternalError(_))));

        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_camp_is_not_found() -> Result<(), TestError> {
        let (test, id) = setup().await?;
        let service = CampService::new(&test.db);

        assert!(service.delete(id).await.is_ok());
        assert!(matches!(
            service.delete(id).await,
            Err(Error::ReliefError(ReliefError::NotFound { .. }))
        ));

        Ok(())
    }
}
