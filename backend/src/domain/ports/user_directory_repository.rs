//! Port abstraction for the persisted user directory.
//!
//! Adapters must enforce uniqueness of email and phone number themselves
//! (for example with unique indexes) and report a rejected insert as
//! [`UserDirectoryRepositoryError::DuplicateKey`]. The service's pre-check
//! only produces the friendlier error earlier.

use async_trait::async_trait;

use crate::domain::{EmailAddress, LookupCredentials, PhoneNumber, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user directory adapters.
    pub enum UserDirectoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
        /// Insert rejected by a uniqueness constraint.
        DuplicateKey { message: String } =>
            "user directory duplicate key: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryRepository: Send + Sync {
    /// Find any record whose email OR phone number matches.
    async fn find_by_email_or_phone(
        &self,
        email: &EmailAddress,
        phone_number: &PhoneNumber,
    ) -> Result<Option<UserRecord>, UserDirectoryRepositoryError>;

    /// Insert a new record.
    async fn insert(&self, record: &UserRecord) -> Result<(), UserDirectoryRepositoryError>;

    /// Find the record whose email AND phone number both match.
    async fn find_by_credentials(
        &self,
        credentials: &LookupCredentials,
    ) -> Result<Option<UserRecord>, UserDirectoryRepositoryError>;
}
