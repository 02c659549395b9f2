use chrono::Utc;
use dioxus_logger::tracing;
use entity::sea_orm_active_enums::RequestStatus;
use sea_orm::DatabaseConnection;

use crate::{
    model::emergency::{EmergencyDto, EmergencyFilter},
    server::{
        data::emergency::{EmergencyRequestFilter, EmergencyRequestRepository},
        error::{relief::ReliefError, Error},
        service::retry::RetryContext,
    },
};

/// Responder-side reads and status transitions of emergency requests.
pub struct EmergencyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmergencyService<'a> {
    /// Creates a new instance of [`EmergencyService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists requests newest first
    ///
    /// A subdivision filter also matches requests that were never routed to a
    /// subdivision, so unrouted SOS calls show up on every dashboard.
    pub async fn list(&self, filter: EmergencyFilter) -> Result<Vec<EmergencyDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let filter = EmergencyRequestFilter {
            subdivision_id: filter.subdivision_id,
            status: filter.status.map(Into::into),
        };

        ctx.execute_with_retry("list emergency requests", |_| {
            let db = db.clone();

            Box::pin(async move {
                let requests = EmergencyRequestRepository::new(&db).select(filter).await?;

                Ok(requests.into_iter().map(EmergencyDto::from).collect())
            })
        })
        .await
    }

    /// Marks a request resolved
    ///
    /// Resolving an already resolved request returns it unchanged.
    pub async fn resolve(&self, id: i32) -> Result<EmergencyDto, Error> {
        let repo = EmergencyRequestRepository::new(self.db);

        let request = repo.get(id).await?.ok_or(ReliefError::NotFound {
            record: "Emergency request",
            id,
        })?;

        if request.status == RequestStatus::Resolved {
            return Ok(request.into());
        }

        let resolved = repo
            .update_status(id, RequestStatus::Resolved, Some(Utc::now().naive_utc()))
            .await?
            .ok_or(ReliefError::NotFound {
                record: "Emergency request",
                id,
            })?;

        tracing::info!("Resolved emergency request ID {}", id);

        Ok(resolved.into())
    }
}

#[cfg(test)]
mod tests {
    use floodwatch_test_utils::prelude::*;

    use super::*;
    use crate::model::emergency::RequestStatus;

    /// Expect resolve to stamp resolved_at once and be a no-op afterwards
    #[tokio::test]
    async fn resolve_is_idempotent() -> Result<(), TestError> {
        let test = test_setup_with_relief_tables!()?;
        let request = test.relief().insert_emergency("Kalady", None, None).await?;

        let service = EmergencyService::new(&test.db);
        let first = service.resolve(request.id).await.unwrap();
        let second = service.resolve(request.id).await.unwrap();

        assert_eq!(first.status, RequestStatus::Resolved);
        assert!(first.resolved_at.is_some());
        assert_eq!(first.resolved_at, second.resolved_at);

        Ok(())
    }

    #[tokio::test]
    async fn resolve_missing_request_is_not_found() -> Result<(), TestError> {
        let test = test_setup_with_relief_tables!()?;

        let service = EmergencyService::new(&test.db);
        let result = service.resolve(404).await;

        assert!(matches!(
            result,
            Err(Error::ReliefError(ReliefError::NotFound { id: 404, .. }))
        ));

        Ok(())
    }

    /// Expect the status filter to be applied to the listing
    #[tokio::test]
    async fn list_filters_status() -> Result<(), TestError> {
        let test = test_setup_with_relief_tables!()?;
        let done = test.relief().insert_emergency("Kalady", None, None).await?;
        test.relief().insert_emergency("Angamaly", None, None).await?;

        let service = EmergencyService::new(&test.db);
        service.resolve(done.id).await.unwrap();
        let pending = service
            .list(EmergencyFilter {
                subdivision_id: None,
                status: Some(RequestStatus::Pending),
            })
            .await
            .unwrap();

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].location, "Angamaly");

        Ok(())
    }
}
