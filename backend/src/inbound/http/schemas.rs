//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A required field is missing or malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The email or phone number is already registered.
    #[schema(rename = "duplicate")]
    Duplicate,
    /// No record matches the request.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Error envelope with a machine-readable code and a human-readable message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "duplicate")]
    code: ErrorCodeSchema,
    #[schema(example = "User already exists with this email or phone number.")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "4f9b8d52-3c1e-4d7a-9f0e-2b6c1a8e5d34")]
    trace_id: Option<String>,
    /// Field and reason for validation failures.
    details: Option<serde_json::Value>,
}
