use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WaterLevelCamera::Table)
                    .if_not_exists()
                    .col(pk_auto(WaterLevelCamera::Id))
                    .col(string(WaterLevelCamera::Name))
                    .col(integer(WaterLevelCamera::RoiX1))
                    .col(integer(WaterLevelCamera::RoiY1))
                    .col(integer(WaterLevelCamera::RoiX2))
                    .col(integer(WaterLevelCamera::RoiY2))
                    .col(integer(WaterLevelCamera::MinValue))
                    .col(integer(WaterLevelCamera::MaxValue))
                    .col(integer(WaterLevelCamera::Threshold))
                    .col(integer_null(WaterLevelCamera::CurrentLevel))
                    .col(string_len(WaterLevelCamera::Status, 16))
                    .col(timestamp_null(WaterLevelCamera::PendingDeleteAt))
                    .col(timestamp(WaterLevelCamera::CreatedAt))
                    .col(timestamp(WaterLevelCamera::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WaterLevelCamera::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WaterLevelCamera {
    Table,
    Id,
    Name,
    RoiX1,
    RoiY1,
    RoiX2,
    RoiY2,
    MinValue,
    MaxValue,
    Threshold,
    CurrentLevel,
    Status,
    PendingDeleteAt,
    CreatedAt,
    UpdatedAt,
}
