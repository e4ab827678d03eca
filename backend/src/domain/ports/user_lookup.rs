//! Driving port for sign-in lookups.
//!
//! Inbound adapters call this port to resolve an (email, phone number) pair
//! to a public profile. No secret is checked.

use async_trait::async_trait;

use crate::domain::{Error, LookupCredentials, UserProfile};

/// Domain use-case port for lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Return the profile whose email and phone number both match.
    async fn lookup(&self, credentials: &LookupCredentials) -> Result<UserProfile, Error>;
}
