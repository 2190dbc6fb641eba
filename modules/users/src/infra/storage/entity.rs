use sea_orm::entity::prelude::*;

/// `users` table. Wire and storage keep the original Spanish column names;
/// the Rust side exposes them under the domain's English field names.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub firebase_uid: String,
    #[sea_orm(column_name = "correo", unique)]
    pub email: String,
    #[sea_orm(column_name = "nombre")]
    pub display_name: Option<String>,
    #[sea_orm(column_name = "ciudad")]
    pub city: Option<String>,
    #[sea_orm(column_name = "pais")]
    pub country: Option<String>,
    #[sea_orm(column_name = "direccion")]
    pub address: Option<String>,
    #[sea_orm(column_name = "edad")]
    pub age: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
