//! Dispatch of emergency requests to rescue teams.
//!
//! An assignment moves `pending_acceptance -> accepted -> completed`, or
//! `pending_acceptance -> rejected`. The request mirrors the state of its latest
//! assignment in `assigned_team_id`/`assignment_status`, and both rows are always
//! written in the same transaction.

use chrono::Utc;
use dioxus_logger::tracing;
use entity::sea_orm_active_enums::{AssignmentStatus, RequestStatus};
use sea_orm::{ActiveEnum, DatabaseConnection, TransactionTrait};

use crate::{
    model::emergency::{AssignEmergencyDto, AssignmentDto},
    server::{
        data::{
            assignment::RescueAssignmentRepository, emergency::EmergencyRequestRepository,
            team::TeamRepository,
        },
        error::{relief::ReliefError, Error},
        service::validate,
    },
};

/// Responder action on an existing assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentAction {
    Accept,
    Reject,
    Complete,
}

impl AssignmentAction {
    fn verb(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Complete => "complete",
        }
    }

    /// Status reached by applying this action, `None` if `current` does not allow it.
    pub fn transition(self, current: AssignmentStatus) -> Option<AssignmentStatus> {
        match (self, current) {
            (Self::Accept, AssignmentStatus::PendingAcceptance) => Some(AssignmentStatus::Accepted),
            (Self::Reject, AssignmentStatus::PendingAcceptance) => Some(AssignmentStatus::Rejected),
            (Self::Complete, AssignmentStatus::Accepted) => Some(AssignmentStatus::Completed),
            _ => None,
        }
    }
}

pub struct AssignmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssignmentService<'a> {
    /// Creates a new instance of [`AssignmentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Dispatches a pending request to a team
    ///
    /// Only requests that are unassigned, or whose last assignment was rejected, can be
    /// dispatched.
    ///
    /// # Returns
    /// - `Ok(AssignmentDto)` - New assignment awaiting the team's acceptance
    /// - `Err(Error::ReliefError)` - Request or team missing (404), or request not
    ///   dispatchable (409)
    pub async fn assign(
        &self,
        emergency_request_id: i32,
        dto: AssignEmergencyDto,
    ) -> Result<AssignmentDto, Error> {
        let txn = self.db.begin().await?;

        let request_repo = EmergencyRequestRepository::new(&txn);
        let request = request_repo
            .get(emergency_request_id)
            .await?
            .ok_or(ReliefError::NotFound {
                record: "Emergency request",
                id: emergency_request_id,
            })?;

        if request.status != RequestStatus::Pending {
            return Err(ReliefError::InvalidTransition {
                record: "Emergency request",
                id: request.id,
                action: "assign",
                state: request.status.to_value(),
            }
            .into());
        }

        if let Some(status) = request
            .assignment_status
            .filter(|status| *status != AssignmentStatus::Rejected)
        {
            return Err(ReliefError::InvalidTransition {
                record: "Emergency request",
                id: request.id,
                action: "assign",
                state: status.to_value(),
            }
            .into());
        }

        if TeamRepository::new(&txn).get(dto.team_lead_id).await?.is_none() {
            return Err(ReliefError::NotFound {
                record: "Team",
                id: dto.team_lead_id,
            }
            .into());
        }

        let assignment = RescueAssignmentRepository::new(&txn)
            .insert(
                request.id,
                dto.team_lead_id,
                validate::optional_text(dto.notes),
            )
            .await?;

        request_repo
            .update_assignment(
                request.id,
                Some(dto.team_lead_id),
                Some(AssignmentStatus::PendingAcceptance),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Assigned emergency request ID {} to team ID {}",
            request.id,
            dto.team_lead_id
        );

        Ok(assignment.into())
    }

    /// Applies a responder action to an assignment and mirrors it onto the request
    ///
    /// Rejecting returns the request to the unassigned pool; completing resolves it
    /// unless it was already resolved by hand.
    pub async fn apply(
        &self,
        assignment_id: i32,
        action: AssignmentAction,
    ) -> Result<AssignmentDto, Error> {
        let txn = self.db.begin().await?;

        let assignment_repo = RescueAssignmentRepository::new(&txn);
        let assignment = assignment_repo
            .get(assignment_id)
            .await?
            .ok_or(ReliefError::NotFound {
                record: "Assignment",
                id: assignment_id,
            })?;

        let next = action
            .transition(assignment.status)
            .ok_or_else(|| ReliefError::InvalidTransition {
                record: "Assignment",
                id: assignment.id,
                action: action.verb(),
                state: assignment.status.to_value(),
            })?;

        let updated = assignment_repo
            .update_status(assignment.id, next)
            .await?
            .ok_or(ReliefError::NotFound {
                record: "Assignment",
                id: assignment_id,
            })?;

        let request_repo = EmergencyRequestRepository::new(&txn);
        let assigned_team_id = match next {
            AssignmentStatus::Rejected => None,
            _ => Some(updated.team_lead_id),
        };

        request_repo
            .update_assignment(updated.emergency_request_id, assigned_team_id, Some(next))
            .await?;

        if next == AssignmentStatus::Completed {
            let already_resolved = request_repo
                .get(updated.emergency_request_id)
                .await?
                .is_some_and(|request| request.status == RequestStatus::Resolved);

            // A request resolved by hand keeps its original resolution time
            if !already_resolved {
                request_repo
                    .update_status(
                        updated.emergency_request_id,
                        RequestStatus::Resolved,
                        Some(Utc::now().naive_utc()),
                    )
                    .await?;
            }
        }

        txn.commit().await?;

        tracing::info!(
            "Assignment ID {} is now {}",
            updated.id,
            updated.status.to_value()
        );

        Ok(updated.into())
    }

    /// Lists a team's assignments, newest first
    pub async fn list_for_team(&self, team_lead_id: i32) -> Result<Vec<AssignmentDto>, Error> {
        if TeamRepository::new(self.db).get(team_lead_id).await?.is_none() {
            return Err(ReliefError::NotFound {
                record: "Team",
                id: team_lead_id,
            }
            .into());
        }

        let assignments = RescueAssignmentRepository::new(self.db)
            .select_by_team(team_lead_id)
            .await?;

        Ok(assignments.into_iter().map(AssignmentDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_follow_state_machine() {
        use AssignmentAction::*;
        use AssignmentStatus::*;

        assert_eq!(Accept.transition(PendingAcceptance), Some(Accepted));
        assert_eq!(Reject.transition(PendingAcceptance), Some(Rejected));
        assert_eq!(Complete.transition(Accepted), Some(Completed));

        assert_eq!(Complete.transition(PendingAcceptance), None);
        assert_eq!(Accept.transition(Rejected), None);
        assert_eq!(Reject.transition(Accepted), None);
        assert_eq!(Accept.transition(Completed), None);
    }

    mod lifecycle {
        use floodwatch_test_utils::prelude::*;

        use super::*;
        use crate::server::{
            data::emergency::EmergencyRequestRepository, service::emergency::EmergencyService,
        };

        async fn setup() -> Result<(TestContext, i32), TestError> {
            let test = TestBuilder::new()
                .with_relief_tables()
                .with_subdivision("Ernakulam", "Aluva")
                .with_team("Anil Kumar", 1)
                .with_team("Beena Thomas", 1)
                .build()
                .await?;
            let request = test
                .relief()
                .insert_emergency("Aluva Market", None, Some(1))
                .await?;

            Ok((test, request.id))
        }

        fn dispatch(team_lead_id: i32) -> AssignEmergencyDto {
            AssignEmergencyDto {
                team_lead_id,
                notes: None,
            }
        }

        /// Expect a completed assignment to resolve its request
        #[tokio::test]
        async fn complete_resolves_request() -> Result<(), TestError> {
            let (test, request_id) = setup().await?;
            let service = AssignmentService::new(&test.db);

            let assignment = service.assign(request_id, dispatch(1)).await.unwrap();
            service
                .apply(assignment.id, AssignmentAction::Accept)
                .await
                .unwrap();
            service
                .apply(assignment.id, AssignmentAction::Complete)
                .await
                .unwrap();

            let request = EmergencyRequestRepository::new(&test.db)
                .get(request_id)
                .await?
                .unwrap();
            assert_eq!(request.status, RequestStatus::Resolved);
            assert_eq!(request.assignment_status, Some(AssignmentStatus::Completed));
            assert!(request.resolved_at.is_some());

            Ok(())
        }

        /// Expect completing after a manual resolve to keep the first resolution time
        #[tokio::test]
        async fn complete_keeps_manual_resolution() -> Result<(), TestError> {
            let (test, request_id) = setup().await?;
            let service = AssignmentService::new(&test.db);

            let assignment = service.assign(request_id, dispatch(1)).await.unwrap();
            service
                .apply(assignment.id, AssignmentAction::Accept)
                .await
                .unwrap();
            let resolved = EmergencyService::new(&test.db)
                .resolve(request_id)
                .await
                .unwrap();
            let completed = service
                .apply(assignment.id, AssignmentAction::Complete)
                .await
                .unwrap();

            let request = EmergencyRequestRepository::new(&test.db)
                .get(request_id)
                .await?
                .unwrap();
            assert!(resolved.resolved_at.is_some());
            assert_eq!(request.resolved_at, resolved.resolved_at);
            assert_eq!(request.status, RequestStatus::Resolved);
            assert_eq!(request.assignment_status, Some(AssignmentStatus::Completed));
            assert_eq!(completed.id, assignment.id);

            Ok(())
        }

        /// Expect a rejected request to be dispatchable to another team
        #[tokio::test]
        async fn reject_returns_request_to_pool() -> Result<(), TestError> {
            let (test, request_id) = setup().await?;
            let service = AssignmentService::new(&test.db);

            let first = service.assign(request_id, dispatch(1)).await.unwrap();
            service
                .apply(first.id, AssignmentAction::Reject)
                .await
                .unwrap();

            let request = EmergencyRequestRepository::new(&test.db)
                .get(request_id)
                .await?
                .unwrap();
            assert_eq!(request.assigned_team_id, None);
            assert_eq!(request.status, RequestStatus::Pending);

            let second = service.assign(request_id, dispatch(2)).await;
            assert!(second.is_ok());

            Ok(())
        }

        /// Expect double dispatch and out of order actions to conflict
        #[tokio::test]
        async fn illegal_transitions_conflict() -> Result<(), TestError> {
            let (test, request_id) = setup().await?;
            let service = AssignmentService::new(&test.db);

            let assignment = service.assign(request_id, dispatch(1)).await.unwrap();
            let double = service.assign(request_id, dispatch(2)).await;
            let early_complete = service
                .apply(assignment.id, AssignmentAction::Complete)
                .await;

            assert!(matches!(
                double,
                Err(Error::ReliefError(ReliefError::InvalidTransition { .. }))
            ));
            assert!(matches!(
                early_complete,
                Err(Error::ReliefError(ReliefError::InvalidTransition { .. }))
            ));

            Ok(())
        }

        /// Expect dispatch to an unknown team to leave the request untouched
        #[tokio::test]
        async fn unknown_team_is_not_found() -> Result<(), TestError> {
            let (test, request_id) = setup().await?;
            let service = AssignmentService::new(&test.db);

            let result = service.assign(request_id, dispatch(99)).await;

            assert!(matches!(
                result,
                Err(Error::ReliefError(ReliefError::NotFound { record: "Team", .. }))
            ));
            let request = EmergencyRequestRepository::new(&test.db)
                .get(request_id)
                .await?
                .unwrap();
            assert_eq!(request.assignment_status, None);

            Ok(())
        }
    }
}
