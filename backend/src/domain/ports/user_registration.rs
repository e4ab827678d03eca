//! Driving port for registering people in the user directory.

use async_trait::async_trait;

use crate::domain::{Error, UserDraft, UserRecord};

/// Domain use-case port for registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create a record for `draft` unless its email or phone number is
    /// already registered.
    async fn register(&self, draft: UserDraft) -> Result<UserRecord, Error>;
}
