//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it can be constructed with a
//! `DatabaseConnection` or a transactional connection.

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::contract::model::{NewUser, User};
use crate::domain::repo::UsersRepository;
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_uid(&self, uid: &str) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find()
            .filter(Column::FirebaseUid.eq(uid))
            .one(&self.conn)
            .await
            .context("find_by_uid failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("find_by_email failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, u: NewUser) -> anyhow::Result<User> {
        let m = UserAM {
            id: NotSet,
            firebase_uid: Set(u.firebase_uid),
            email: Set(u.email),
            display_name: Set(u.display_name),
            city: Set(u.city),
            country: Set(u.country),
            address: Set(u.address),
            age: Set(u.age),
        };
        let inserted = m.insert(&self.conn).await.context("insert user failed")?;
        Ok(inserted.into())
    }

    async fn update(&self, u: User) -> anyhow::Result<()> {
        // Only the mutable profile columns are written; firebase_uid and
        // correo stay NotSet so the statement cannot touch them.
        let m = UserAM {
            id: Set(u.id),
            firebase_uid: NotSet,
            email: NotSet,
            display_name: Set(u.display_name),
            city: Set(u.city),
            country: Set(u.country),
            address: Set(u.address),
            age: Set(u.age),
        };
        let _ = m.update(&self.conn).await.context("update user failed")?;
        Ok(())
    }
}
