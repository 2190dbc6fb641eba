//! SeaORM-backed repository implementation for the event-log port.

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::contract::model::{CycleEvent, NewCycleEvent};
use crate::domain::repo::CycleEventsRepository;
use crate::infra::storage::entity::{ActiveModel as EventAM, Column, Entity as EventEntity};

pub struct SeaOrmCycleEventsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmCycleEventsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> CycleEventsRepository for SeaOrmCycleEventsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn insert(&self, e: NewCycleEvent) -> anyhow::Result<CycleEvent> {
        let m = EventAM {
            id: NotSet,
            user_id: Set(e.user_id),
            event_type: Set(e.event_type),
            date: Set(e.date),
            meta: Set(e.meta),
        };
        let inserted = m.insert(&self.conn).await.context("insert event failed")?;
        Ok(inserted.into())
    }

    async fn list_for_user(&self, uid: &str) -> anyhow::Result<Vec<CycleEvent>> {
        // Newest date first; ascending id keeps same-date events in
        // insertion order.
        let rows = EventEntity::find()
            .filter(Column::UserId.eq(uid))
            .order_by_desc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("list_for_user failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
