//! User directory domain service.
//!
//! Implements the registration and lookup driving ports on top of a
//! [`UserDirectoryRepository`]. Registration checks for an existing email or
//! phone number before inserting; the repository's own uniqueness guard
//! settles races between concurrent registrations.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    UserDirectoryRepository, UserDirectoryRepositoryError, UserLookup, UserRegistration,
};
use crate::domain::{Error, LookupCredentials, UserDraft, UserId, UserProfile, UserRecord};

/// Message returned when an email or phone number is already registered.
pub const DUPLICATE_USER_MESSAGE: &str = "User already exists with this email or phone number.";
/// Message returned when no record matches a lookup.
pub const USER_NOT_FOUND_MESSAGE: &str = "Invalid credentials. User not found.";

/// Domain service implementing [`UserRegistration`] and [`UserLookup`].
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserDirectoryService<R> {
    /// Create a new service over `repository`, stamping records with `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

fn map_repository_error(error: UserDirectoryRepositoryError) -> Error {
    match error {
        UserDirectoryRepositoryError::Connection { message } => {
            Error::internal(format!("user directory unavailable: {message}"))
        }
        UserDirectoryRepositoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
        UserDirectoryRepositoryError::DuplicateKey { .. } => Error::duplicate(DUPLICATE_USER_MESSAGE),
    }
}

#[async_trait]
impl<R> UserRegistration for UserDirectoryService<R>
where
    R: UserDirectoryRepository,
{
    async fn register(&self, draft: UserDraft) -> Result<UserRecord, Error> {
        if let Some(existing) = self
            .repository
            .find_by_email_or_phone(draft.email(), draft.phone_number())
            .await
            .map_err(map_repository_error)?
        {
            warn!(existing_user_id = %existing.id(), "registration rejected: duplicate user");
            return Err(Error::duplicate(DUPLICATE_USER_MESSAGE));
        }

        let record = UserRecord::new(UserId::random(), draft, self.clock.utc());
        match self.repository.insert(&record).await {
            Ok(()) => {
                info!(user_id = %record.id(), "user registered");
                Ok(record)
            }
            Err(error @ UserDirectoryRepositoryError::DuplicateKey { .. }) => {
                warn!(%error, "registration rejected at insert: duplicate user");
                Err(map_repository_error(error))
            }
            Err(error) => Err(map_repository_error(error)),
        }
    }
}

#[async_trait]
impl<R> UserLookup for UserDirectoryService<R>
where
    R: UserDirectoryRepository,
{
    async fn lookup(&self, credentials: &LookupCredentials) -> Result<UserProfile, Error> {
        self.repository
            .find_by_credentials(credentials)
            .await
            .map_err(map_repository_error)?
            .map(|record| record.profile())
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;
