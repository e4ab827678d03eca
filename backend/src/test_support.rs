//! Test utilities shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{UserDirectoryRepository, UserDirectoryRepositoryError};
use crate::domain::{EmailAddress, LookupCredentials, PhoneNumber, UserRecord};

/// In-memory user directory enforcing the same uniqueness rules as the
/// `users` table's unique indexes.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use mockable::DefaultClock;
/// use tidewatch::domain::UserDirectoryService;
/// use tidewatch::test_support::InMemoryUserDirectoryRepository;
///
/// let repository = Arc::new(InMemoryUserDirectoryRepository::new());
/// let service = UserDirectoryService::new(repository.clone(), Arc::new(DefaultClock));
/// assert!(repository.is_empty());
/// # drop(service);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserDirectoryRepository {
    records: Mutex<Vec<UserRecord>>,
    blind_precheck: AtomicBool,
    unavailable: AtomicBool,
}

impl InMemoryUserDirectoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `find_by_email_or_phone` report no match, as when a concurrent
    /// registration commits between the pre-check and the insert.
    pub fn with_blind_precheck(self) -> Self {
        self.blind_precheck.store(true, Ordering::Release);
        self
    }

    /// Fail every operation with a connection error while `unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Release);
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("records lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_records<T>(
        &self,
        f: impl FnOnce(&mut Vec<UserRecord>) -> Result<T, UserDirectoryRepositoryError>,
    ) -> Result<T, UserDirectoryRepositoryError> {
        if self.unavailable.load(Ordering::Acquire) {
            return Err(UserDirectoryRepositoryError::connection(
                "in-memory directory unavailable",
            ));
        }
        let mut records = self
            .records
            .lock()
            .map_err(|_| UserDirectoryRepositoryError::query("in-memory directory poisoned"))?;
        f(&mut records)
    }
}

#[async_trait]
impl UserDirectoryRepository for InMemoryUserDirectoryRepository {
    async fn find_by_email_or_phone(
        &self,
        email: &EmailAddress,
        phone_number: &PhoneNumber,
    ) -> Result<Option<UserRecord>, UserDirectoryRepositoryError> {
        let blind = self.blind_precheck.load(Ordering::Acquire);
        self.with_records(|records| {
            if blind {
                return Ok(None);
            }
            Ok(records
                .iter()
                .find(|r| r.email() == email || r.phone_number() == phone_number)
                .cloned())
        })
    }

    async fn insert(&self, record: &UserRecord) -> Result<(), UserDirectoryRepositoryError> {
        self.with_records(|records| {
            if records.iter().any(|r| r.email() == record.email()) {
                return Err(UserDirectoryRepositoryError::duplicate_key("users_email_key"));
            }
            if records
                .iter()
                .any(|r| r.phone_number() == record.phone_number())
            {
                return Err(UserDirectoryRepositoryError::duplicate_key(
                    "users_phone_number_key",
                ));
            }
            records.push(record.clone());
            Ok(())
        })
    }

    async fn find_by_credentials(
        &self,
        credentials: &LookupCredentials,
    ) -> Result<Option<UserRecord>, UserDirectoryRepositoryError> {
        self.with_records(|records| {
            Ok(records
                .iter()
                .find(|r| {
                    r.email() == credentials.email()
                        && r.phone_number() == credentials.phone_number()
                })
                .cloned())
        })
    }
}
