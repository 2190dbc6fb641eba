use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;

/// Domain service with the directory's business rules.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "users.service.find_by_uid", skip(self))]
    pub async fn find_by_uid(&self, uid: &str) -> Result<User, DomainError> {
        self.repo
            .find_by_uid(uid)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(uid))
    }

    #[instrument(name = "users.service.find_by_email", skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.repo
            .find_by_email(email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    /// Persist a profile already created with the identity provider.
    /// Fails when the email is taken; the row is keyed by `firebase_uid`.
    #[instrument(
        name = "users.service.register",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn register(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Registering user");

        if new_user.firebase_uid.trim().is_empty() {
            return Err(DomainError::validation("firebase_uid cannot be empty"));
        }
        if new_user.email.trim().is_empty() {
            return Err(DomainError::validation("correo cannot be empty"));
        }

        if self.find_by_email(&new_user.email).await?.is_some() {
            return Err(DomainError::email_already_exists(new_user.email));
        }

        let user = self
            .repo
            .insert(new_user)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Registered user with id={}", user.id);
        Ok(user)
    }

    /// Upsert keyed by the verified subject id: create the row on first
    /// contact, otherwise apply only the supplied fields. Returns the stored
    /// user and whether the call created it.
    #[instrument(name = "users.service.sync", skip(self, patch))]
    pub async fn sync(&self, uid: &str, patch: UserPatch) -> Result<(User, bool), DomainError> {
        if uid.trim().is_empty() {
            return Err(DomainError::MissingSubject);
        }

        let existing = self
            .repo
            .find_by_uid(uid)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        match existing {
            None => {
                // First contact: the email becomes the row's permanent one.
                let email = patch
                    .email
                    .filter(|e| !e.trim().is_empty())
                    .ok_or_else(|| DomainError::validation("correo is required on first sync"))?;

                if self.find_by_email(&email).await?.is_some() {
                    return Err(DomainError::email_already_exists(email));
                }

                let user = self
                    .repo
                    .insert(NewUser {
                        firebase_uid: uid.to_string(),
                        email,
                        display_name: patch.display_name,
                        city: patch.city,
                        country: patch.country,
                        address: patch.address,
                        age: patch.age,
                    })
                    .await
                    .map_err(|e| DomainError::database(e.to_string()))?;

                info!("Created user id={} on first sync", user.id);
                Ok((user, true))
            }
            Some(mut current) => {
                // Partial update; subject id and email stay as stored.
                if let Some(display_name) = patch.display_name {
                    current.display_name = Some(display_name);
                }
                if let Some(city) = patch.city {
                    current.city = Some(city);
                }
                if let Some(country) = patch.country {
                    current.country = Some(country);
                }
                if let Some(address) = patch.address {
                    current.address = Some(address);
                }
                if let Some(age) = patch.age {
                    current.age = Some(age);
                }

                self.repo
                    .update(current.clone())
                    .await
                    .map_err(|e| DomainError::database(e.to_string()))?;

                debug!("Synced existing user id={}", current.id);
                Ok((current, false))
            }
        }
    }
}
