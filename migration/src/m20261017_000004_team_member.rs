use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261017_000003_team::Team;

static IDX_TEAM_MEMBER_TEAM_LEAD_ID: &str = "idx-team_member-team_lead_id";
static FK_TEAM_MEMBER_TEAM_LEAD_ID: &str = "fk-team_member-team_lead_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamMember::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamMember::Id))
                    .col(integer(TeamMember::TeamLeadId))
                    .col(string(TeamMember::FullName))
                    .col(string(TeamMember::PhoneNumber))
                    .col(timestamp(TeamMember::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TEAM_MEMBER_TEAM_LEAD_ID)
                    .table(TeamMember::Table)
                    .col(TeamMember::TeamLeadId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TEAM_MEMBER_TEAM_LEAD_ID)
                    .from_tbl(TeamMember::Table)
                    .from_col(TeamMember::TeamLeadId)
                    .to_tbl(Team::Table)
                    .to_col(Team::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_TEAM_MEMBER_TEAM_LEAD_ID)
                    .table(TeamMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TEAM_MEMBER_TEAM_LEAD_ID)
                    .table(TeamMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TeamMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum TeamMember {
    Table,
    Id,
    TeamLeadId,
    FullName,
    PhoneNumber,
    CreatedAt,
}
