//! Domain primitives, services and ports.
//!
//! Purpose: define the user directory model and the use-cases that inbound
//! adapters drive. Types are immutable once validated; adapters talk to the
//! domain only through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-neutral failure payload.
//! - UserDraft / UserRecord / UserProfile: registration candidate, stored
//!   record and its public projection.
//! - LookupCredentials: validated (email, phone number) pair.
//! - UserDirectoryService: implements the registration and lookup ports.

pub mod error;
pub mod lookup;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::lookup::{LookupCredentials, LookupValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PhoneNumber, UserDraft, UserDraftParts, UserField, UserId, UserProfile,
    UserRecord, UserRecordParts, UserValidationError,
};
pub use self::user_directory_service::{
    DUPLICATE_USER_MESSAGE, USER_NOT_FOUND_MESSAGE, UserDirectoryService,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use tidewatch::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
