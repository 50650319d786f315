use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Readings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Readings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Readings::DeviceId).uuid().not_null())
                    .col(ColumnDef::new(Readings::Value).double().not_null())
                    .col(
                        ColumnDef::new(Readings::CapturedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Readings::Table, Readings::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        // History queries scan by device over a time window.
        manager
            .create_index(
                Index::create()
                    .table(Readings::Table)
                    .col(Readings::DeviceId)
                    .col(Readings::CapturedAt)
                    .name("idx_readings_device_id_captured_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Readings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Readings {
    Table,
    Id,
    DeviceId,
    Value,
    CapturedAt,
}

#[derive(Iden)]
enum Devices {
    Table,
    Id,
}
