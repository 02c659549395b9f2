use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20261017_000003_team::Team, m20261017_000005_emergency_request::EmergencyRequest,
};

static IDX_RESCUE_ASSIGNMENT_EMERGENCY_REQUEST_ID: &str =
    "idx-rescue_assignment-emergency_request_id";
static IDX_RESCUE_ASSIGNMENT_TEAM_LEAD_ID: &str = "idx-rescue_assignment-team_lead_id";
static FK_RESCUE_ASSIGNMENT_EMERGENCY_REQUEST_ID: &str =
    "fk-rescue_assignment-emergency_request_id";
static FK_RESCUE_ASSIGNMENT_TEAM_LEAD_ID: &str = "fk-rescue_assignment-team_lead_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RescueAssignment::Table)
                    .if_not_exists()
                    .col(pk_auto(RescueAssignment::Id))
                    .col(integer(RescueAssignment::EmergencyRequestId))
                    .col(integer(RescueAssignment::TeamLeadId))
                    .col(string_len(RescueAssignment::Status, 24))
                    .col(text_null(RescueAssignment::Notes))
                    .col(timestamp(RescueAssignment::AssignedAt))
                    .col(timestamp(RescueAssignment::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RESCUE_ASSIGNMENT_EMERGENCY_REQUEST_ID)
                    .table(RescueAssignment::Table)
                    .col(RescueAssignment::EmergencyRequestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RESCUE_ASSIGNMENT_TEAM_LEAD_ID)
                    .table(RescueAssignment::Table)
                    .col(RescueAssignment::TeamLeadId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESCUE_ASSIGNMENT_EMERGENCY_REQUEST_ID)
                    .from_tbl(RescueAssignment::Table)
                    .from_col(RescueAssignment::EmergencyRequestId)
                    .to_tbl(EmergencyRequest::Table)
                    .to_col(EmergencyRequest::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESCUE_ASSIGNMENT_TEAM_LEAD_ID)
                    .from_tbl(RescueAssignment::Table)
                    .from_col(RescueAssignment::TeamLeadId)
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
                    .name(FK_RESCUE_ASSIGNMENT_TEAM_LEAD_ID)
                    .table(RescueAssignment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RESCUE_ASSIGNMENT_EMERGENCY_REQUEST_ID)
                    .table(RescueAssignment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_RESCUE_ASSIGNMENT_TEAM_LEAD_ID)
                    .table(RescueAssignment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_RESCUE_ASSIGNMENT_EMERGENCY_REQUEST_ID)
                    .table(RescueAssignment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RescueAssignment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RescueAssignment {
    Table,
    Id,
    EmergencyRequestId,
    TeamLeadId,
    Status,
    Notes,
    AssignedAt,
    UpdatedAt,
}
