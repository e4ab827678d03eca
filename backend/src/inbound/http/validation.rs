//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every client-side failure is reported as an `invalid_request` error whose
//! `details` name the offending field and a stable reason code.

use serde_json::json;

use crate::domain::{Error, LookupValidationError, UserField, UserValidationError};

/// Message shown when a registration field is missing.
pub const MISSING_FIELDS_MESSAGE: &str = "Please enter all fields.";
/// Message shown when a lookup parameter is missing.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Email and phone number are required.";
const INVALID_PHONE_MESSAGE: &str = "Phone number must contain digits only.";
const MALFORMED_REQUEST_MESSAGE: &str = "Request could not be parsed.";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidPhoneNumber,
    MalformedBody,
    MalformedQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidPhoneNumber => "invalid_phone_number",
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::MalformedQuery => "malformed_query",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

impl From<UserField> for FieldName {
    fn from(value: UserField) -> Self {
        Self::new(value.as_str())
    }
}

fn field_error(field: FieldName, message: &str, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn phone_field() -> FieldName {
    FieldName::from(UserField::PhoneNumber)
}

/// Map registration validation failures onto the HTTP error envelope.
pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::MissingField { field } => field_error(
            field.into(),
            MISSING_FIELDS_MESSAGE,
            ErrorCode::MissingField,
        ),
        UserValidationError::InvalidPhoneNumber => field_error(
            phone_field(),
            INVALID_PHONE_MESSAGE,
            ErrorCode::InvalidPhoneNumber,
        ),
    }
}

/// Map lookup validation failures onto the HTTP error envelope.
pub(crate) fn map_lookup_validation_error(err: LookupValidationError) -> Error {
    match err {
        LookupValidationError::MissingEmail => field_error(
            UserField::Email.into(),
            MISSING_CREDENTIALS_MESSAGE,
            ErrorCode::MissingField,
        ),
        LookupValidationError::MissingPhoneNumber => field_error(
            phone_field(),
            MISSING_CREDENTIALS_MESSAGE,
            ErrorCode::MissingField,
        ),
        LookupValidationError::InvalidPhoneNumber => field_error(
            phone_field(),
            INVALID_PHONE_MESSAGE,
            ErrorCode::InvalidPhoneNumber,
        ),
    }
}

/// Error for a body the JSON extractor rejected.
pub(crate) fn malformed_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(MALFORMED_REQUEST_MESSAGE).with_details(json!({
        "code": ErrorCode::MalformedBody.as_str(),
        "reason": reason.to_string(),
    }))
}

/// Error for a query string the extractor rejected.
pub(crate) fn malformed_query_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(MALFORMED_REQUEST_MESSAGE).with_details(json!({
        "code": ErrorCode::MalformedQuery.as_str(),
        "reason": reason.to_string(),
    }))
}
