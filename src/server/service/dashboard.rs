use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        camp::CampDto,
        dashboard::{DashboardDto, DashboardFilter},
        emergency::EmergencyDto,
        resource::ResourceDto,
    },
    server::{
        data::{
            camp::{CampFilter, CampRepository},
            emergency::{EmergencyRequestFilter, EmergencyRequestRepository},
            resource::{ResourceFilter, ResourceRepository},
        },
        error::Error,
        service::retry::RetryContext,
    },
};

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    /// Creates a new instance of [`DashboardService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches requests, camps and resources for a subdivision concurrently
    ///
    /// `fetched_at` is taken before the reads start, so every request stored before it
    /// is part of the snapshot.
    ///
    /// # Arguments
    /// - `filter` - Optional subdivision scope
    /// - `refresh_interval_secs` - Interval the client should re-fetch at
    pub async fn snapshot(
        &self,
        filter: DashboardFilter,
        refresh_interval_secs: u64,
    ) -> Result<DashboardDto, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let subdivision_id = filter.subdivision_id;

        ctx.execute_with_retry("fetch dashboard", |_| {
            let db = db.clone();

            Box::pin(async move {
                let fetched_at = Utc::now().naive_utc();

                let emergency_repo = EmergencyRequestRepository::new(&db);
                let camp_repo = CampRepository::new(&db);
                let resource_repo = ResourceRepository::new(&db);

                let (emergencies, camps, resources) = futures::try_join!(
                    emergency_repo.select(EmergencyRequestFilter {
                        subdivision_id,
                        status: None,
                    }),
                    camp_repo.select(CampFilter {
                        subdivision_id,
                        status: None,
                    }),
                    resource_repo.select(ResourceFilter {
                        subdivision_id,
                        ..Default::default()
                    }),
                )?;

                Ok(DashboardDto {
                    emergencies: emergencies.into_iter().map(EmergencyDto::from).collect(),
                    camps: camps
                        .into_iter()
                        .map(CampDto::try_from)
                        .collect::<Result<_, _>>()?,
                    resources: resources.into_iter().map(ResourceDto::from).collect(),
                    fetched_at,
                    refresh_interval_secs,
                })
            })
        })
        .await
    }
}
