use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::{AssignmentStatus, RequestStatus, WaterDepth};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::db::EmergencyRequestModel;

/// Validated SOS submission ready to be stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEmergencyRequest {
    pub location: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub affected_people: Option<i32>,
    pub water_depth: Option<WaterDepth>,
    pub medical_needs: Option<String>,
    pub subdivision_id: Option<i32>,
    pub idempotency_key: Option<String>,
}

/// Row filter for [`EmergencyRequestRepository::select`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmergencyRequestFilter {
    /// Matches this subdivision and requests without one
    pub subdivision_id: Option<i32>,
    pub status: Option<RequestStatus>,
}

pub struct EmergencyRequestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EmergencyRequestRepository<'a, C> {
    /// Creates a new instance of [`EmergencyRequestRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores a new request with status `pending`
    pub async fn insert(
        &self,
        request: NewEmergencyRequest,
    ) -> Result<EmergencyRequestModel, DbErr> {
        let now = Utc::now().naive_utc();

        entity::emergency_request::ActiveModel {
            location: ActiveValue::Set(request.location),
            description: ActiveValue::Set(request.description),
            latitude: ActiveValue::Set(request.latitude),
            longitude: ActiveValue::Set(request.longitude),
            status: ActiveValue::Set(RequestStatus::Pending),
            contact_name: ActiveValue::Set(request.contact_name),
            contact_phone: ActiveValue::Set(request.contact_phone),
            affected_people: ActiveValue::Set(request.affected_people),
            water_depth: ActiveValue::Set(request.water_depth),
            medical_needs: ActiveValue::Set(request.medical_needs),
            subdivision_id: ActiveValue::Set(request.subdivision_id),
            idempotency_key: ActiveValue::Set(request.idempotency_key),
            assigned_team_id: ActiveValue::Set(None),
            assignment_status: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            resolved_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<EmergencyRequestModel>, DbErr> {
        entity::prelude::EmergencyRequest::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<EmergencyRequestModel>, DbErr> {
        entity::prelude::EmergencyRequest::find()
            .filter(entity::emergency_request::Column::IdempotencyKey.eq(key))
            .one(self.db)
            .await
    }

    /// Lists requests matching the filter, newest first
    pub async fn select(
        &self,
        filter: EmergencyRequestFilter,
    ) -> Result<Vec<EmergencyRequestModel>, DbErr> {
        use entity::emergency_request::Column;

        let mut query = entity::prelude::EmergencyRequest::find();

        if let Some(subdivision_id) = filter.subdivision_id {
            query = query.filter(
                Condition::any()
                    .add(Column::SubdivisionId.eq(subdivision_id))
                    .add(Column::SubdivisionId.is_null()),
            );
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

    /// Sets the request status, stamping `resolved_at` when resolving
    ///
    /// Returns `None` if the request does not exist.
    pub async fn update_status(
        &self,
        id: i32,
        status: RequestStatus,
        resolved_at: Option<NaiveDateTime>,
    ) -> Result<Option<EmergencyRequestModel>, DbErr> {
        let Some(request) = self.get(id).await? else {
            return Ok(None);
        };

        let mut request_am = request.into_active_model();
        request_am.status = ActiveValue::Set(status);
        request_am.resolved_at = ActiveValue::Set(resolved_at);
        request_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(request_am.update(self.db).await?))
    }

    /// Mirrors the state of the request's active assignment onto the request
    ///
    /// Returns `None` if the request does not exist.
    pub async fn update_assignment(
        &self,
        id: i32,
        assigned_team_id: Option<i32>,
        assignment_status: Option<AssignmentStatus>,
    ) -> Result<Option<EmergencyRequestModel>, DbErr> {
        let Some(request) = self.get(id).await? else {
            return Ok(None);
        };

        let mut request_am = request.into_active_model();
        request_am.assigned_team_id = ActiveValue::Set(assigned_team_id);
        request_am.assignment_status = ActiveValue::Set(assignment_status);
        request_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(request_am.update(self.db).await?))
    }

    /// Clears the assignment stamp from every request assigned to a team
    pub async fn unassign_team(&self, team_lead_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::EmergencyRequest::update_many()
            .set(entity::emergency_request::ActiveModel {
                assigned_team_id: ActiveValue::Set(None),
                assignment_status: ActiveValue::Set(None),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::emergency_request::Column::AssignedTeamId.eq(team_lead_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sos(location: &str) -> NewEmergencyRequest {
        NewEmergencyRequest {
            location: location.to_string(),
            description: "Water entering ground floor".to_string(),
            ..Default::default()
        }
    }

    mod insert {
        use floodwatch_test_utils::prelude::*;

        use super::*;

        /// Expect new requests to be stored as pending with server timestamps
        #[tokio::test]
        async fn stores_pending_request() -> Result<(), TestError> {
            let test = test_setup_with_relief_tables!()?;
            let repo = EmergencyRequestRepository::new(&test.db);

            let before = Utc::now().naive_utc();
            let request = repo.insert(sos("Periyar Bridge")).await?;

            assert_eq!(request.status, RequestStatus::Pending);
            assert!(request.created_at >= before);
            assert!(request.resolved_at.is_none());

            Ok(())
        }

        /// Expect a second insert with the same idempotency key to violate the unique index
        #[tokio::test]
        async fn rejects_duplicate_idempotency_key() -> Result<(), TestError> {
            let test = test_setup_with_relief_tables!()?;
            let repo = EmergencyRequestRepository::new(&test.db);

            let mut request = sos("Periyar Bridge");
            request.idempotency_key = Some("sos-1".to_string());

            repo.insert(request.clone()).await?;
            let result = repo.insert(request).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod select {
        use floodwatch_test_utils::prelude::*;

        use super::*;

        /// Expect subdivision scoping to keep unrouted requests and drop other subdivisions
        #[tokio::test]
        async fn includes_unrouted_requests_in_subdivision_scope() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_relief_tables()
                .with_subdivision("Ernakulam", "Aluva")
                .with_subdivision("Ernakulam", "Kochi")
                .build()
                .await?;

            let aluva = test
                .relief()
                .insert_emergency("Aluva Market", None, Some(1))
                .await?;
            let unrouted = test.relief().insert_emergency("Unknown", None, None).await?;
            test.relief()
                .insert_emergency("Fort Kochi", None, Some(2))
                .await?;

            let repo = EmergencyRequestRepository::new(&test.db);
            let result = repo
                .select(EmergencyRequestFilter {
                    subdivision_id: Some(1),
                    status: None,
                })
                .await?;

            let ids: Vec<i32> = result.iter().map(|r| r.id).collect();
            assert_eq!(ids.len(), 2);
            assert!(ids.contains(&aluva.id));
            assert!(ids.contains(&unrouted.id));

            Ok(())
        }

        /// Expect newest requests first and status filtering
        #[tokio::test]
        async fn orders_newest_first_and_filters_status() -> Result<(), TestError> {
            let test = test_setup_with_relief_tables!()?;
            let repo = EmergencyRequestRepository::new(&test.db);

            let first = repo.insert(sos("Kalady")).await?;
            let second = repo.insert(sos("Chalakudy")).await?;
            repo.update_status(first.id, RequestStatus::Resolved, Some(Utc::now().naive_utc()))
                .await?;

            let all = repo.select(EmergencyRequestFilter::default()).await?;
            let pending = repo
                .select(EmergencyRequestFilter {
                    subdivision_id: None,
                    status: Some(RequestStatus::Pending),
                })
                .await?;

            assert_eq!(all.first().map(|r| r.id), Some(second.id));
            assert_eq!(pending.len(), 1);
            assert_eq!(pending[0].id, second.id);

            Ok(())
        }
    }

    mod update_status {
        use floodwatch_test_utils::prelude::*;

        use super::*;

        /// Expect Ok(None) when the request does not exist
        #[tokio::test]
        async fn returns_none_for_missing_request() -> Result<(), TestError> {
            let test = test_setup_with_relief_tables!()?;
            let repo = EmergencyRequestRepository::new(&test.db);

            let result = repo.update_status(42, RequestStatus::Resolved, None).await?;

            assert!(result.is_none());

            Ok(())
        }
    }
}
