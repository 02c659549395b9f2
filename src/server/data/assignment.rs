use chrono::Utc;
use entity::sea_orm_active_enums::AssignmentStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::db::RescueAssignmentModel;

pub struct RescueAssignmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RescueAssignmentRepository<'a, C> {
    /// Creates a new instance of [`RescueAssignmentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an assignment awaiting the team's acceptance
    pub async fn insert(
        &self,
        emergency_request_id: i32,
        team_lead_id: i32,
        notes: Option<String>,
    ) -> Result<RescueAssignmentModel, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::RescueAssignment::insert(entity::rescue_assignment::ActiveModel {
            emergency_request_id: ActiveValue::Set(emergency_request_id),
            team_lead_id: ActiveValue::Set(team_lead_id),
            status: ActiveValue::Set(AssignmentStatus::PendingAcceptance),
            notes: ActiveValue::Set(notes),
            assigned_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<RescueAssignmentModel>, DbErr> {
        entity::prelude::RescueAssignment::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Lists a team's assignments, most recent first
    pub async fn select_by_team(
        &self,
        team_lead_id: i32,
    ) -> Result<Vec<RescueAssignmentModel>, DbErr> {
        entity::prelude::RescueAssignment::find()
            .filter(entity::rescue_assignment::Column::TeamLeadId.eq(team_lead_id))
            .order_by_desc(entity::rescue_assignment::Column::AssignedAt)
            .order_by_desc(entity::rescue_assignment::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns `None` if the assignment does not exist
    pub async fn update_status(
        &self,
        id: i32,
        status: AssignmentStatus,
    ) -> Result<Option<RescueAssignmentModel>, DbErr> {
        let Some(assignment) = self.get(id).await? else {
            return Ok(None);
        };

        let mut assignment_am = assignment.into_active_model();
        assignment_am.status = ActiveValue::Set(status);
        assignment_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(assignment_am.update(self.db).await?))
    }

    pub async fn delete_by_team(&self, team_lead_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::RescueAssignment::delete_many()
            .filter(entity::rescue_assignment::Column::TeamLeadId.eq(team_lead_id))
            .exec(self.db)
            .await
    }
}
