//! User directory data model.
//!
//! A [`UserRecord`] is created from a validated [`UserDraft`] and is never
//! mutated afterwards. Constructors normalise raw text so that equality on
//! email and phone number is equality on canonical values.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Required user attributes, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    City,
}

impl UserField {
    /// Field name used by request payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "Fname",
            Self::LastName => "Lname",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::City => "city",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors returned when building user directory values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// A required field was absent or blank once trimmed.
    MissingField { field: UserField },
    /// The phone number contained something other than decimal digits.
    InvalidPhoneNumber,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber => write!(f, "phoneNumber must contain digits only"),
        }
    }
}

impl std::error::Error for UserValidationError {}

fn required(field: UserField, value: Option<&str>) -> Result<String, UserValidationError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(UserValidationError::MissingField { field }),
    }
}

/// Stable, system-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address, trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate a raw email value.
    ///
    /// # Examples
    /// ```
    /// use tidewatch::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("  Ann@X.com ").unwrap();
    /// assert_eq!(email.as_ref(), "ann@x.com");
    /// ```
    pub fn new(raw: &str) -> Result<Self, UserValidationError> {
        required(UserField::Email, Some(raw)).map(|value| Self(value.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Phone number held as a canonical string of decimal digits.
///
/// Strings are trimmed and must then be all ASCII digits. Leading zeros are
/// dropped so the text form and the integer form of one number compare
/// equal. A number whose value is zero counts as missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a textual phone number.
    ///
    /// # Examples
    /// ```
    /// use tidewatch::domain::PhoneNumber;
    ///
    /// assert_eq!(PhoneNumber::parse(" 5551234 ").unwrap().as_ref(), "5551234");
    /// assert_eq!(PhoneNumber::parse("005551234").unwrap().as_ref(), "5551234");
    /// assert!(PhoneNumber::parse("555-1234").is_err());
    /// assert!(PhoneNumber::parse("000").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let digits = required(UserField::PhoneNumber, Some(raw))?;
        if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(UserValidationError::InvalidPhoneNumber);
        }
        let canonical = digits.trim_start_matches('0');
        if canonical.is_empty() {
            return Err(UserValidationError::MissingField {
                field: UserField::PhoneNumber,
            });
        }
        Ok(Self(canonical.to_owned()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw, unvalidated registration inputs.
///
/// Every field is optional so the domain, not the transport, decides what
/// counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraftParts {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
}

/// Validated registration candidate.
///
/// ## Invariants
/// - Every text field is trimmed and non-empty.
/// - `email` is lower-cased; `phone_number` is all digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    first_name: String,
    last_name: String,
    email: EmailAddress,
    phone_number: PhoneNumber,
    city: String,
}

impl UserDraft {
    /// Validate raw inputs, reporting the first missing field in payload
    /// order (`Fname`, `Lname`, `email`, `phoneNumber`, `city`).
    ///
    /// # Examples
    /// ```
    /// use tidewatch::domain::{UserDraft, UserDraftParts, UserField, UserValidationError};
    ///
    /// let err = UserDraft::try_from_parts(UserDraftParts {
    ///     first_name: Some("Ann".into()),
    ///     ..UserDraftParts::default()
    /// })
    /// .unwrap_err();
    /// assert_eq!(err, UserValidationError::MissingField { field: UserField::LastName });
    /// ```
    pub fn try_from_parts(parts: UserDraftParts) -> Result<Self, UserValidationError> {
        let UserDraftParts {
            first_name,
            last_name,
            email,
            phone_number,
            city,
        } = parts;

        let first_name = required(UserField::FirstName, first_name.as_deref())?;
        let last_name = required(UserField::LastName, last_name.as_deref())?;
        let email = EmailAddress::new(email.as_deref().unwrap_or_default())?;
        let phone_number = PhoneNumber::parse(phone_number.as_deref().unwrap_or_default())?;
        let city = required(UserField::City, city.as_deref())?;

        Ok(Self {
            first_name,
            last_name,
            email,
            phone_number,
            city,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Persisted column values used to rehydrate a [`UserRecord`].
#[derive(Debug, Clone)]
pub struct UserRecordParts {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A registered person.
///
/// ## Invariants
/// - Carries every field of the [`UserDraft`] it was created from.
/// - `id` never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    draft: UserDraft,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a new record stamped with `now` for both timestamps.
    pub fn new(id: UserId, draft: UserDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a record from stored values, re-checking field invariants.
    pub fn try_from_parts(parts: UserRecordParts) -> Result<Self, UserValidationError> {
        let UserRecordParts {
            id,
            first_name,
            last_name,
            email,
            phone_number,
            city,
            created_at,
            updated_at,
        } = parts;

        let draft = UserDraft::try_from_parts(UserDraftParts {
            first_name: Some(first_name),
            last_name: Some(last_name),
            email: Some(email),
            phone_number: Some(phone_number),
            city: Some(city),
        })?;

        Ok(Self {
            id: UserId::from_uuid(id),
            draft,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        self.draft.first_name()
    }

    pub fn last_name(&self) -> &str {
        self.draft.last_name()
    }

    pub fn email(&self) -> &EmailAddress {
        self.draft.email()
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        self.draft.phone_number()
    }

    pub fn city(&self) -> &str {
        self.draft.city()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Public projection returned by sign-in lookups.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            first_name: self.first_name().to_owned(),
            last_name: self.last_name().to_owned(),
            email: self.email().clone(),
            city: self.city().to_owned(),
        }
    }
}

/// Public view of a [`UserRecord`]: no phone number, no timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub city: String,
}
