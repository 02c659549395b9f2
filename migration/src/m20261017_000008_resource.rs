use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20261017_000002_subdivision::Subdivision, m20261017_000003_team::Team};

static IDX_RESOURCE_SUBDIVISION_ID: &str = "idx-resource-subdivision_id";
static IDX_RESOURCE_TYPE_STATUS: &str = "idx-resource-resource_type-status";
static FK_RESOURCE_SUBDIVISION_ID: &str = "fk-resource-subdivision_id";
static FK_RESOURCE_TEAM_LEAD_ID: &str = "fk-resource-team_lead_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resource::Table)
                    .if_not_exists()
                    .col(pk_auto(Resource::Id))
                    .col(integer_null(Resource::TeamLeadId))
                    .col(integer(Resource::SubdivisionId))
                    .col(string(Resource::Name))
                    .col(string_len(Resource::ResourceType, 16))
                    .col(integer(Resource::Quantity))
                    .col(string(Resource::Unit))
                    .col(integer(Resource::LowThreshold))
                    .col(string(Resource::ProviderName))
                    .col(string_len(Resource::ProviderType, 16))
                    .col(string(Resource::ContactNumber))
                    .col(string(Resource::Location))
                    .col(double_null(Resource::Latitude))
                    .col(double_null(Resource::Longitude))
                    .col(text_null(Resource::Notes))
                    .col(string_len(Resource::Status, 16))
                    .col(timestamp(Resource::CreatedAt))
                    .col(timestamp(Resource::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RESOURCE_SUBDIVISION_ID)
                    .table(Resource::Table)
                    .col(Resource::SubdivisionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RESOURCE_TYPE_STATUS)
                    .table(Resource::Table)
                    .col(Resource::ResourceType)
                    .col(Resource::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESOURCE_SUBDIVISION_ID)
                    .from_tbl(Resource::Table)
                    .from_col(Resource::SubdivisionId)
                    .to_tbl(Subdivision::Table)
                    .to_col(Subdivision::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESOURCE_TEAM_LEAD_ID)
                    .from_tbl(Resource::Table)
                    .from_col(Resource::TeamLeadId)
                    .to_tbl(Team::Table)
                    .to_col(Team::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_RESOURCE_TEAM_LEAD_ID, FK_RESOURCE_SUBDIVISION_ID] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(Resource::Table)
                        .to_owned(),
                )
                .await?;
        }

        for index in [IDX_RESOURCE_TYPE_STATUS, IDX_RESOURCE_SUBDIVISION_ID] {
            manager
                .drop_index(Index::drop().name(index).table(Resource::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Resource::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Resource {
    Table,
    Id,
    TeamLeadId,
    SubdivisionId,
    Name,
    ResourceType,
    Quantity,
    Unit,
    LowThreshold,
    ProviderName,
    ProviderType,
    ContactNumber,
    Location,
    Latitude,
    Longitude,
    Notes,
    Status,
    CreatedAt,
    UpdatedAt,
}
