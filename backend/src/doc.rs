//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user directory and health endpoints together with
//! the request/response DTOs and the error envelope schemas
//! ([`ErrorSchema`], [`ErrorCodeSchema`]). Swagger UI serves it in debug
//! builds and `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    LookupUserResponse, PhoneNumberInput, RegisterUserRequest, RegisterUserResponse,
    UserProfileBody,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tidewatch API",
        description = "User directory for the coastal-safety app: registration and lookup by email and phone number."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterUserRequest,
        RegisterUserResponse,
        PhoneNumberInput,
        LookupUserResponse,
        UserProfileBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Registration and lookup in the user directory"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
