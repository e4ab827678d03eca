//! User directory HTTP handlers.
//!
//! ```text
//! POST /user/post {"Fname":"Ann","Lname":"Lee","email":"ann@x.com","phoneNumber":5551234,"city":"Metro"}
//! GET  /user/get?email=ann@x.com&phoneNumber=5551234
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LookupCredentials, UserDraft, UserDraftParts, UserProfile, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    malformed_body_error, malformed_query_error, map_lookup_validation_error,
    map_user_validation_error,
};

/// Message returned with a newly created record.
pub const REGISTERED_MESSAGE: &str = "User registered successfully";
/// Message returned with a successful lookup.
pub const SIGNED_IN_MESSAGE: &str = "Sign-in successful!";

/// Phone number as sent by clients: a JSON number or a numeric string.
///
/// Floats are accepted only when they hold a whole, non-negative value that
/// fits in a `u64`; anything else is rendered in exponent form and fails the
/// digits-only check.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PhoneNumberInput {
    Number(u64),
    Float(f64),
    Text(String),
}

// 2^64 as an f64; every whole float below it converts to `u64` exactly.
const U64_FLOAT_BOUND: f64 = 18_446_744_073_709_551_616.0;

impl PhoneNumberInput {
    fn into_text(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Float(value) if is_whole_u64(value) => (value as u64).to_string(),
            Self::Float(value) => format!("{value:e}"),
            Self::Text(value) => value,
        }
    }
}

fn is_whole_u64(value: f64) -> bool {
    value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < U64_FLOAT_BOUND
}

/// Registration request body for `POST /user/post`.
///
/// Every field is optional at the wire level so a missing field produces the
/// directory's own validation error rather than a parse failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterUserRequest {
    #[serde(rename = "Fname")]
    #[schema(example = "Ann")]
    pub first_name: Option<String>,
    #[serde(rename = "Lname")]
    #[schema(example = "Lee")]
    pub last_name: Option<String>,
    #[schema(example = "ann@x.com")]
    pub email: Option<String>,
    #[serde(rename = "phoneNumber")]
    #[schema(example = 5551234)]
    pub phone_number: Option<PhoneNumberInput>,
    #[schema(example = "Metro")]
    pub city: Option<String>,
}

impl From<RegisterUserRequest> for UserDraftParts {
    fn from(value: RegisterUserRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone_number: value.phone_number.map(PhoneNumberInput::into_text),
            city: value.city,
        }
    }
}

/// Response body for a successful registration.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterUserResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    #[serde(rename = "_id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[serde(rename = "Fname")]
    pub first_name: String,
    #[serde(rename = "Lname")]
    pub last_name: String,
    pub email: String,
    /// Canonical decimal-digit form.
    #[serde(rename = "phoneNumber")]
    #[schema(example = "5551234")]
    pub phone_number: String,
    pub city: String,
}

impl From<UserRecord> for RegisterUserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            message: REGISTERED_MESSAGE.to_owned(),
            id: record.id().to_string(),
            first_name: record.first_name().to_owned(),
            last_name: record.last_name().to_owned(),
            email: record.email().to_string(),
            phone_number: record.phone_number().to_string(),
            city: record.city().to_owned(),
        }
    }
}

/// Query parameters for `GET /user/get`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupUserQuery {
    /// Registered email address (case-insensitive).
    pub email: Option<String>,
    /// Registered phone number, digits only.
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

/// Public profile returned by a lookup.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserProfileBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[serde(rename = "Fname")]
    pub first_name: String,
    #[serde(rename = "Lname")]
    pub last_name: String,
    pub email: String,
    pub city: String,
}

impl From<UserProfile> for UserProfileBody {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email.to_string(),
            city: profile.city,
        }
    }
}

/// Response body for a successful lookup.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LookupUserResponse {
    #[schema(example = "Sign-in successful!")]
    pub message: String,
    pub user: UserProfileBody,
}

/// Register a person in the user directory.
#[utoipa::path(
    post,
    path = "/user/post",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterUserResponse),
        (status = 400, description = "Missing field or duplicate email/phone", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/post")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from_parts(payload.into_inner().into())
        .map_err(map_user_validation_error)?;
    let record = state.registration.register(draft).await?;
    Ok(HttpResponse::Created().json(RegisterUserResponse::from(record)))
}

/// Look a person up by email and phone number.
#[utoipa::path(
    get,
    path = "/user/get",
    params(LookupUserQuery),
    responses(
        (status = 200, description = "User found", body = LookupUserResponse),
        (status = 400, description = "Missing email or phone number", body = ErrorSchema),
        (status = 404, description = "No matching user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/get")]
pub async fn get_user(
    state: web::Data<HttpState>,
    query: web::Query<LookupUserQuery>,
) -> ApiResult<web::Json<LookupUserResponse>> {
    let LookupUserQuery {
        email,
        phone_number,
    } = query.into_inner();
    let credentials =
        LookupCredentials::try_from_parts(email.as_deref(), phone_number.as_deref())
            .map_err(map_lookup_validation_error)?;
    let profile = state.lookup.lookup(&credentials).await?;
    Ok(web::Json(LookupUserResponse {
        message: SIGNED_IN_MESSAGE.to_owned(),
        user: profile.into(),
    }))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| malformed_body_error(err).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| malformed_query_error(err).into())
}

/// The `/user` scope with its extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use tidewatch::inbound::http::users;
///
/// let app = App::new().service(users::scope());
/// ```
pub fn scope() -> actix_web::Scope {
    web::scope("/user")
        .app_data(json_config())
        .app_data(query_config())
        .service(register_user)
        .service(get_user)
}

#[cfg(test)]
mod tests;
