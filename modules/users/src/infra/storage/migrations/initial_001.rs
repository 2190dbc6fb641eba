use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::FirebaseUid)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Correo).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Nombre).string())
                    .col(ColumnDef::new(Users::Ciudad).string())
                    .col(ColumnDef::new(Users::Pais).string())
                    .col(ColumnDef::new(Users::Direccion).string())
                    .col(ColumnDef::new(Users::Edad).integer())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FirebaseUid,
    Correo,
    Nombre,
    Ciudad,
    Pais,
    Direccion,
    Edad,
}
