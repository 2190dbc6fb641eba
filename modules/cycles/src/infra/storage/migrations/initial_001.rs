use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CycleEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CycleEvents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CycleEvents::UserId).string().not_null())
                    .col(ColumnDef::new(CycleEvents::Type).string().not_null())
                    .col(ColumnDef::new(CycleEvents::Date).date().not_null())
                    .col(ColumnDef::new(CycleEvents::Meta).json())
                    .to_owned(),
            )
            .await?;

        // Events join to users by external subject id; the secondary index
        // backs the per-user history scan.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cycle_events_user_id")
                    .table(CycleEvents::Table)
                    .col(CycleEvents::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CycleEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CycleEvents {
    Table,
    Id,
    UserId,
    Type,
    Date,
    Meta,
}
