use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::db::{TeamMemberModel, TeamModel};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTeam {
    pub full_name: String,
    pub phone_number: String,
    pub alternate_phone: Option<String>,
    pub designation: String,
    pub subdivision_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTeamMember {
    pub full_name: String,
    pub phone_number: String,
}

pub struct TeamRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeamRepository<'a, C> {
    /// Creates a new instance of [`TeamRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn insert(&self, team: NewTeam) -> Result<TeamModel, DbErr> {
        entity::prelude::Team::insert(entity::team::ActiveModel {
            full_name: ActiveValue::Set(team.full_name),
            phone_number: ActiveValue::Set(team.phone_number),
            alternate_phone: ActiveValue::Set(team.alternate_phone),
            designation: ActiveValue::Set(team.designation),
            subdivision_id: ActiveValue::Set(team.subdivision_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, team_lead_id: i32) -> Result<Option<TeamModel>, DbErr> {
        entity::prelude::Team::find_by_id(team_lead_id)
            .one(self.db)
            .await
    }

    /// Lists teams with their members, optionally scoped to a subdivision
    pub async fn select_with_members(
        &self,
        subdivision_id: Option<i32>,
    ) -> Result<Vec<(TeamModel, Vec<TeamMemberModel>)>, DbErr> {
        let mut query = entity::prelude::Team::find();

        if let Some(subdivision_id) = subdivision_id {
            query = query.filter(entity::team::Column::SubdivisionId.eq(subdivision_id));
        }

        query
            .order_by_asc(entity::team::Column::Id)
            .find_with_related(entity::team_member::Entity)
            .all(self.db)
            .await
    }

    /// Deletes the team row only
    ///
    /// Callers must clear dependent rows first, see `TeamService::delete`.
    pub async fn delete(&self, team_lead_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Team::delete_by_id(team_lead_id)
            .exec(self.db)
            .await
    }
}

pub struct TeamMemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeamMemberRepository<'a, C> {
    /// Creates a new instance of [`TeamMemberRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        team_lead_id: i32,
        member: NewTeamMember,
    ) -> Result<TeamMemberModel, DbErr> {
        entity::prelude::TeamMember::insert(entity::team_member::ActiveModel {
            team_lead_id: ActiveValue::Set(team_lead_id),
            full_name: ActiveValue::Set(member.full_name),
            phone_number: ActiveValue::Set(member.phone_number),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn select_by_team(&self, team_lead_id: i32) -> Result<Vec<TeamMemberModel>, DbErr> {
        entity::prelude::TeamMember::find()
            .filter(entity::team_member::Column::TeamLeadId.eq(team_lead_id))
            .order_by_asc(entity::team_member::Column::Id)
            .all(self.db)
            .await
    }

    /// Deletes a member only if it belongs to the given team
    pub async fn delete(&self, team_lead_id: i32, member_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::TeamMember::delete_many()
            .filter(entity::team_member::Column::Id.eq(member_id))
            .filter(entity::team_member::Column::TeamLeadId.eq(team_lead_id))
            .exec(self.db)
            .await
    }

    pub async fn delete_by_team(&self, team_lead_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::TeamMember::delete_many()
            .filter(entity::team_member::Column::TeamLeadId.eq(team_lead_id))
            .exec(self.db)
            .await
    }
}
