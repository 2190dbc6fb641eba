use sea_orm::entity::prelude::*;

/// `cycle_events` table. `user_id` holds the external subject id (indexed,
/// no foreign key); `meta` is an opaque JSON blob.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cycle_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub user_id: String,
    #[sea_orm(column_name = "type")]
    pub event_type: String,
    pub date: Date,
    pub meta: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
