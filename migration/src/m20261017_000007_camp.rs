use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20261017_000002_subdivision::Subdivision, m20261017_000003_team::Team};

static IDX_CAMP_SUBDIVISION_ID: &str = "idx-camp-subdivision_id";
static FK_CAMP_SUBDIVISION_ID: &str = "fk-camp-subdivision_id";
static FK_CAMP_TEAM_LEAD_ID: &str = "fk-camp-team_lead_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Camp::Table)
                    .if_not_exists()
                    .col(pk_auto(Camp::Id))
                    .col(integer_null(Camp::TeamLeadId))
                    .col(integer(Camp::SubdivisionId))
                    .col(string(Camp::Name))
                    .col(string(Camp::Location))
                    .col(text(Camp::Address))
                    .col(double_null(Camp::Latitude))
                    .col(double_null(Camp::Longitude))
                    .col(integer(Camp::Capacity))
                    .col(integer(Camp::CurrentOccupancy))
                    .col(string_len(Camp::Status, 16))
                    .col(string(Camp::ContactNumber))
                    .col(json(Camp::Facilities))
                    .col(timestamp(Camp::CreatedAt))
                    .col(timestamp(Camp::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CAMP_SUBDIVISION_ID)
                    .table(Camp::Table)
                    .col(Camp::SubdivisionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CAMP_SUBDIVISION_ID)
                    .from_tbl(Camp::Table)
                    .from_col(Camp::SubdivisionId)
                    .to_tbl(Subdivision::Table)
                    .to_col(Subdivision::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CAMP_TEAM_LEAD_ID)
                    .from_tbl(Camp::Table)
                    .from_col(Camp::TeamLeadId)
                    .to_tbl(Team::Table)
                    .to_col(Team::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_CAMP_TEAM_LEAD_ID, FK_CAMP_SUBDIVISION_ID] {
            manager
                .drop_foreign_key(ForeignKey::drop().name(fk).table(Camp::Table).to_owned())
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CAMP_SUBDIVISION_ID)
                    .table(Camp::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Camp::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Camp {
    Table,
    Id,
    TeamLeadId,
    SubdivisionId,
    Name,
    Location,
    Address,
    Latitude,
    Longitude,
    Capacity,
    CurrentOccupancy,
    Status,
    ContactNumber,
    Facilities,
    CreatedAt,
    UpdatedAt,
}
