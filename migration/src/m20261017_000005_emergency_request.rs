use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20261017_000002_subdivision::Subdivision, m20261017_000003_team::Team};

static IDX_EMERGENCY_REQUEST_STATUS: &str = "idx-emergency_request-status";
static IDX_EMERGENCY_REQUEST_SUBDIVISION_ID: &str = "idx-emergency_request-subdivision_id";
static IDX_EMERGENCY_REQUEST_CREATED_AT: &str = "idx-emergency_request-created_at";
static IDX_EMERGENCY_REQUEST_IDEMPOTENCY_KEY: &str = "idx-emergency_request-idempotency_key";
static FK_EMERGENCY_REQUEST_SUBDIVISION_ID: &str = "fk-emergency_request-subdivision_id";
static FK_EMERGENCY_REQUEST_ASSIGNED_TEAM_ID: &str = "fk-emergency_request-assigned_team_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmergencyRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(EmergencyRequest::Id))
                    .col(string(EmergencyRequest::Location))
                    .col(text(EmergencyRequest::Description))
                    .col(double_null(EmergencyRequest::Latitude))
                    .col(double_null(EmergencyRequest::Longitude))
                    .col(string_len(EmergencyRequest::Status, 16))
                    .col(string_null(EmergencyRequest::ContactName))
                    .col(string_null(EmergencyRequest::ContactPhone))
                    .col(integer_null(EmergencyRequest::AffectedPeople))
                    .col(string_len_null(EmergencyRequest::WaterDepth, 16))
                    .col(text_null(EmergencyRequest::MedicalNeeds))
                    .col(integer_null(EmergencyRequest::SubdivisionId))
                    .col(string_len_null(EmergencyRequest::IdempotencyKey, 128))
                    .col(integer_null(EmergencyRequest::AssignedTeamId))
                    .col(string_len_null(EmergencyRequest::AssignmentStatus, 24))
                    .col(timestamp(EmergencyRequest::CreatedAt))
                    .col(timestamp(EmergencyRequest::UpdatedAt))
                    .col(timestamp_null(EmergencyRequest::ResolvedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EMERGENCY_REQUEST_STATUS)
                    .table(EmergencyRequest::Table)
                    .col(EmergencyRequest::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EMERGENCY_REQUEST_SUBDIVISION_ID)
                    .table(EmergencyRequest::Table)
                    .col(EmergencyRequest::SubdivisionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EMERGENCY_REQUEST_CREATED_AT)
                    .table(EmergencyRequest::Table)
                    .col(EmergencyRequest::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Postgres treats NULLs as distinct, so legacy submissions without a key never collide
        manager
            .create_index(
                Index::create()
                    .name(IDX_EMERGENCY_REQUEST_IDEMPOTENCY_KEY)
                    .table(EmergencyRequest::Table)
                    .col(EmergencyRequest::IdempotencyKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EMERGENCY_REQUEST_SUBDIVISION_ID)
                    .from_tbl(EmergencyRequest::Table)
                    .from_col(EmergencyRequest::SubdivisionId)
                    .to_tbl(Subdivision::Table)
                    .to_col(Subdivision::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EMERGENCY_REQUEST_ASSIGNED_TEAM_ID)
                    .from_tbl(EmergencyRequest::Table)
                    .from_col(EmergencyRequest::AssignedTeamId)
                    .to_tbl(Team::Table)
                    .to_col(Team::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_EMERGENCY_REQUEST_ASSIGNED_TEAM_ID)
                    .table(EmergencyRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_EMERGENCY_REQUEST_SUBDIVISION_ID)
                    .table(EmergencyRequest::Table)
                    .to_owned(),
            )
            .await?;

        for index in [
            IDX_EMERGENCY_REQUEST_IDEMPOTENCY_KEY,
            IDX_EMERGENCY_REQUEST_CREATED_AT,
            IDX_EMERGENCY_REQUEST_SUBDIVISION_ID,
            IDX_EMERGENCY_REQUEST_STATUS,
        ] {
            manager
                .drop_index(
                    Index::drop()
                        .name(index)
                        .table(EmergencyRequest::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(EmergencyRequest::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EmergencyRequest {
    Table,
    Id,
    Location,
    Description,
    Latitude,
    Longitude,
    Status,
    ContactName,
    ContactPhone,
    AffectedPeople,
    WaterDepth,
    MedicalNeeds,
    SubdivisionId,
    IdempotencyKey,
    AssignedTeamId,
    AssignmentStatus,
    CreatedAt,
    UpdatedAt,
    ResolvedAt,
}
