use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261017_000002_subdivision::Subdivision;

static IDX_TEAM_SUBDIVISION_ID: &str = "idx-team-subdivision_id";
static FK_TEAM_SUBDIVISION_ID: &str = "fk-team-subdivision_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(pk_auto(Team::Id))
                    .col(string(Team::FullName))
                    .col(string(Team::PhoneNumber))
                    .col(string_null(Team::AlternatePhone))
                    .col(string(Team::Designation))
                    .col(integer(Team::SubdivisionId))
                    .col(timestamp(Team::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TEAM_SUBDIVISION_ID)
                    .table(Team::Table)
                    .col(Team::SubdivisionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TEAM_SUBDIVISION_ID)
                    .from_tbl(Team::Table)
                    .from_col(Team::SubdivisionId)
                    .to_tbl(Subdivision::Table)
                    .to_col(Subdivision::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_TEAM_SUBDIVISION_ID)
                    .table(Team::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TEAM_SUBDIVISION_ID)
                    .table(Team::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Team {
    Table,
    Id,
    FullName,
    PhoneNumber,
    AlternatePhone,
    Designation,
    SubdivisionId,
    CreatedAt,
}
