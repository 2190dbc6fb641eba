use crate::contract::model::{NewUser, User};
use async_trait::async_trait;

/// Port for the domain layer: persistence operations the directory needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by external subject id.
    async fn find_by_uid(&self, uid: &str) -> anyhow::Result<Option<User>>;
    /// Load a user by contact email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Insert a new row and return it with the generated id.
    async fn insert(&self, u: NewUser) -> anyhow::Result<User>;
    /// Persist the mutable fields of an existing row (by primary key in
    /// `u.id`). `firebase_uid` and `email` are never written.
    async fn update(&self, u: User) -> anyhow::Result<()>;
}
