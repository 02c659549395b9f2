use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::team::{CreateTeamDto, CreateTeamMemberDto, TeamDto, TeamFilter, TeamMemberDto},
    server::{
        data::{
            assignment::RescueAssignmentRepository,
            camera::RescueCameraRepository,
            camp::CampRepository,
            emergency::EmergencyRequestRepository,
            resource::ResourceRepository,
            team::{NewTeam, NewTeamMember, TeamMemberRepository, TeamRepository},
        },
        error::{relief::ReliefError, validation::ValidationError, Error},
        service::{retry::RetryContext, validate},
    },
};

fn team_not_found(id: i32) -> ReliefError {
    ReliefError::NotFound { record: "Team", id }
}

fn validate_member(dto: CreateTeamMemberDto) -> Result<NewTeamMember, ValidationError> {
    Ok(NewTeamMember {
        full_name: validate::required_text("full_name", &dto.full_name)?,
        phone_number: validate::required_text("phone_number", &dto.phone_number)?,
    })
}

pub struct TeamService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamService<'a> {
    /// Creates a new instance of [`TeamService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists teams together with their members
    pub async fn list(&self, filter: TeamFilter) -> Result<Vec<TeamDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let subdivision_id = filter.subdivision_id;

        ctx.execute_with_retry("list teams", |_| {
            let db = db.clone();

            Box::pin(async move {
                let teams = TeamRepository::new(&db)
                    .select_with_members(subdivision_id)
                    .await?;

                Ok(teams.into_iter().map(TeamDto::from).collect())
            })
        })
        .await
    }

    /// Creates a team and its initial members in one transaction
    pub async fn create(&self, dto: CreateTeamDto) -> Result<TeamDto, Error> {
        let team = NewTeam {
            full_name: validate::required_text("full_name", &dto.full_name)?,
            phone_number: validate::required_text("phone_number", &dto.phone_number)?,
            alternate_phone: validate::optional_text(dto.alternate_phone),
            designation: dto.designation.trim().to_string(),
            subdivision_id: dto.subdivision_id,
        };
        let members = dto
            .members
            .into_iter()
            .map(validate_member)
            .collect::<Result<Vec<_>, _>>()?;

        let txn = self.db.begin().await?;
        validate::owner_exists(&txn, Some(team.subdivision_id), None).await?;

        let team = TeamRepository::new(&txn).insert(team).await?;

        let member_repo = TeamMemberRepository::new(&txn);
        let mut stored = Vec::with_capacity(members.len());
        for member in members {
            stored.push(member_repo.insert(team.id, member).await?);
        }

        txn.commit().await?;

        tracing::info!(
            "Created team ID {} with {} members",
            team.id,
            stored.len()
        );

        Ok((team, stored).into())
    }

    pub async fn add_member(
        &self,
        team_lead_id: i32,
        dto: CreateTeamMemberDto,
    ) -> Result<TeamMemberDto, Error> {
        let member = validate_member(dto)?;

        if TeamRepository::new(self.db).get(team_lead_id).await?.is_none() {
            return Err(team_not_found(team_lead_id).into());
        }

        let member = TeamMemberRepository::new(self.db)
            .insert(team_lead_id, member)
            .await?;

        Ok(member.into())
    }

    pub async fn remove_member(&self, team_lead_id: i32, member_id: i32) -> Result<(), Error> {
        let result = TeamMemberRepository::new(self.db)
            .delete(team_lead_id, member_id)
            .await?;

        if result.rows_affected == 0 {
            return Err(ReliefError::NotFound {
                record: "Team member",
                id: member_id,
            }
            .into());
        }

        Ok(())
    }

    /// Deletes a team, its members and its assignments
    ///
    /// Camps, resources and cameras the team managed are kept with no owner, and
    /// requests assigned to it return to the unassigned pool. Everything happens in
    /// one transaction.
    pub async fn delete(&self, team_lead_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let team_repo = TeamRepository::new(&txn);
        if team_repo.get(team_lead_id).await?.is_none() {
            return Err(team_not_found(team_lead_id).into());
        }

        let members = TeamMemberRepository::new(&txn)
            .delete_by_team(team_lead_id)
            .await?;
        EmergencyRequestRepository::new(&txn)
            .unassign_team(team_lead_id)
            .await?;
        RescueAssignmentRepository::new(&txn)
            .delete_by_team(team_lead_id)
            .await?;
        CampRepository::new(&txn).detach_team(team_lead_id).await?;
        ResourceRepository::new(&txn)
            .detach_team(team_lead_id)
            .await?;
        RescueCameraRepository::new(&txn)
            .detach_team(team_lead_id)
            .await?;
        team_repo.delete(team_lead_id).await?;

        txn.commit().await?;

        tracing::info!(
            "Deleted team ID {} and {} members",
            team_lead_id,
            members.rows_affected
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use floodwatch_test_utils::prelude::*;
    use sea_orm::EntityTrait;

    use super::*;

    fn member(name: &str) -> CreateTeamMemberDto {
        CreateTeamMemberDto {
            full_name: name.to_string(),
            phone_number: "9447111111".to_string(),
        }
    }

    /// Expect deleting a team to remove members and detach owned rows
    #[tokio::test]
    async fn delete_cascades() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_relief_tables()
            .with_subdivision("Ernakulam", "Aluva")
            .with_team("Anil Kumar", 1)
            .build()
            .await?;
        test.relief().insert_team_member(1, "Rahul").await?;
        test.relief().insert_team_member(1, "Sreeja").await?;
        let camera = test.relief().insert_rescue_camera(1, Some(1)).await?;

        let service = TeamService::new(&test.db);
        service.delete(1).await.unwrap();

        let members = entity::prelude::TeamMember::find().all(&test.db).await?;
        let camera = entity::prelude::RescueCamera::find_by_id(camera.id)
            .one(&test.db)
            .await?
            .unwrap();
        assert!(members.is_empty());
        assert_eq!(camera.team_lead_id, None);
        assert!(entity::prelude::Team::find_by_id(1).one(&test.db).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_team_is_not_found() -> Result<(), TestError> {
        let test = test_setup_with_relief_tables!()?;

        let service = TeamService::new(&test.db);
        let result = service.delete(3).await;

        assert!(matches!(
            result,
            Err(Error::ReliefError(ReliefError::NotFound { record: "Team", .. }))
        ));

        Ok(())
    }

    /// Expect a team and its members to be created together
    #[tokio::test]
    async fn create_with_members() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_relief_tables()
            .with_subdivision("Thrissur", "Chalakudy")
            .build()
            .await?;

        let service = TeamService::new(&test.db);
        let team = service
            .create(CreateTeamDto {
                full_name: "Meera Nair".to_string(),
                phone_number: "9447222222".to_string(),
                alternate_phone: Some(" ".to_string()),
                designation: "Coastal Police".to_string(),
                subdivision_id: 1,
                members: vec![member("Arjun"), member("Fathima")],
            })
            .await
            .unwrap();

        assert_eq!(team.members.len(), 2);
        assert_eq!(team.alternate_phone, None);
        assert!(team.members.iter().all(|m| m.team_lead_id == team.id));

        Ok(())
    }

    /// Expect an invalid member to reject the whole team
    #[tokio::test]
    async fn create_rejects_blank_member() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_relief_tables()
            .with_subdivision("Thrissur", "Chalakudy")
            .build()
            .await?;

        let service = TeamService::new(&test.db);
        let result = service
            .create(CreateTeamDto {
                full_name: "Meera Nair".to_string(),
                phone_number: "9447222222".to_string(),
                subdivision_id: 1,
                members: vec![member("Arjun"), member("  ")],
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(Error::ValidationError(_))));
        assert!(entity::prelude::Team::find().all(&test.db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn remove_member_from_other_team_is_not_found() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_relief_tables()
            .with_subdivision("Ernakulam", "Aluva")
            .with_team("Anil Kumar", 1)
            .with_team("Beena Thomas", 1)
            .build()
            .await?;
        let rahul = test.relief().insert_team_member(1, "Rahul").await?;

        let service = TeamService::new(&test.db);
        let result = service.remove_member(2, rahul.id).await;

        assert!(matches!(
            result,
            Err(Error::ReliefError(ReliefError::NotFound { .. }))
        ));

        Ok(())
    }
}
