use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261017_000001_district::District;

static IDX_SUBDIVISION_DISTRICT_ID: &str = "idx-subdivision-district_id";
static FK_SUBDIVISION_DISTRICT_ID: &str = "fk-subdivision-district_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subdivision::Table)
                    .if_not_exists()
                    .col(pk_auto(Subdivision::Id))
                    .col(integer(Subdivision::DistrictId))
                    .col(string(Subdivision::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SUBDIVISION_DISTRICT_ID)
                    .table(Subdivision::Table)
                    .col(Subdivision::DistrictId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SUBDIVISION_DISTRICT_ID)
                    .from_tbl(Subdivision::Table)
                    .from_col(Subdivision::DistrictId)
                    .to_tbl(District::Table)
                    .to_col(District::Id)
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
                    .name(FK_SUBDIVISION_DISTRICT_ID)
                    .table(Subdivision::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SUBDIVISION_DISTRICT_ID)
                    .table(Subdivision::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Subdivision::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Subdivision {
    Table,
    Id,
    DistrictId,
    Name,
}
