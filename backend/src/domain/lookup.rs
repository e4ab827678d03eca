//! Sign-in lookup credentials.
//!
//! Lookups match on the exact pair of normalised email and phone number.
//! Constructors apply the same normalisation as registration so that a
//! lookup never misses on letter case or surrounding whitespace.

use std::fmt;

use super::user::{EmailAddress, PhoneNumber, UserValidationError};

/// Domain error returned when lookup inputs are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupValidationError {
    /// Email was missing or blank once trimmed.
    MissingEmail,
    /// Phone number was missing or blank once trimmed.
    MissingPhoneNumber,
    /// Phone number contained something other than decimal digits.
    InvalidPhoneNumber,
}

impl fmt::Display for LookupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEmail => write!(f, "email must not be empty"),
            Self::MissingPhoneNumber => write!(f, "phoneNumber must not be empty"),
            Self::InvalidPhoneNumber => write!(f, "phoneNumber must contain digits only"),
        }
    }
}

impl std::error::Error for LookupValidationError {}

/// Validated lookup pair.
///
/// # Examples
/// ```
/// use tidewatch::domain::LookupCredentials;
///
/// let creds = LookupCredentials::try_from_parts(Some(" Ann@X.com"), Some("5551234")).unwrap();
/// assert_eq!(creds.email().as_ref(), "ann@x.com");
/// assert_eq!(creds.phone_number().as_ref(), "5551234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCredentials {
    email: EmailAddress,
    phone_number: PhoneNumber,
}

impl LookupCredentials {
    /// Construct credentials from raw query values.
    pub fn try_from_parts(
        email: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<Self, LookupValidationError> {
        let email = EmailAddress::new(email.unwrap_or_default())
            .map_err(|_| LookupValidationError::MissingEmail)?;
        let phone_number =
            PhoneNumber::parse(phone_number.unwrap_or_default()).map_err(|err| match err {
                UserValidationError::InvalidPhoneNumber => LookupValidationError::InvalidPhoneNumber,
                UserValidationError::MissingField { .. } => {
                    LookupValidationError::MissingPhoneNumber
                }
            })?;
        Ok(Self {
            email,
            phone_number,
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }
}
