use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20261017_000002_subdivision::Subdivision, m20261017_000003_team::Team};

static IDX_RESCUE_CAMERA_SUBDIVISION_ID: &str = "idx-rescue_camera-subdivision_id";
static FK_RESCUE_CAMERA_SUBDIVISION_ID: &str = "fk-rescue_camera-subdivision_id";
static FK_RESCUE_CAMERA_TEAM_LEAD_ID: &str = "fk-rescue_camera-team_lead_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RescueCamera::Table)
                    .if_not_exists()
                    .col(pk_auto(RescueCamera::Id))
                    .col(integer_null(RescueCamera::TeamLeadId))
                    .col(integer(RescueCamera::SubdivisionId))
                    .col(string(RescueCamera::LocationName))
                    .col(string_len(RescueCamera::FeedType, 16))
                    .col(json(RescueCamera::Config))
                    .col(string_len(RescueCamera::Status, 16))
                    .col(timestamp_null(RescueCamera::PendingDeleteAt))
                    .col(timestamp(RescueCamera::CreatedAt))
                    .col(timestamp(RescueCamera::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RESCUE_CAMERA_SUBDIVISION_ID)
                    .table(RescueCamera::Table)
                    .col(RescueCamera::SubdivisionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESCUE_CAMERA_SUBDIVISION_ID)
                    .from_tbl(RescueCamera::Table)
                    .from_col(RescueCamera::SubdivisionId)
                    .to_tbl(Subdivision::Table)
                    .to_col(Subdivision::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESCUE_CAMERA_TEAM_LEAD_ID)
                    .from_tbl(RescueCamera::Table)
                    .from_col(RescueCamera::TeamLeadId)
                    .to_tbl(Team::Table)
                    .to_col(Team::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_RESCUE_CAMERA_TEAM_LEAD_ID, FK_RESCUE_CAMERA_SUBDIVISION_ID] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(RescueCamera::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_RESCUE_CAMERA_SUBDIVISION_ID)
                    .table(RescueCamera::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RescueCamera::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RescueCamera {
    Table,
    Id,
    TeamLeadId,
    SubdivisionId,
    LocationName,
    FeedType,
    Config,
    Status,
    PendingDeleteAt,
    CreatedAt,
    UpdatedAt,
}
