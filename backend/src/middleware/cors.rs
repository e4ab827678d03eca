//! Cross-origin policy for browser clients.
//!
//! [`CorsPolicy`] is validated once at start-up and turned into an
//! [`actix_cors::Cors`] middleware per worker. Pre-flight requests are answered
//! by the middleware; actual responses gain the allow-origin and expose
//! headers when the request carries an `Origin`.

use actix_cors::Cors;
use actix_web::http::Uri;
use actix_web::http::header::{ACCEPT, CONTENT_TYPE, HeaderValue, InvalidHeaderValue};

use crate::domain::TRACE_ID_HEADER;

const ANY_ORIGIN: &str = "*";
const ALLOWED_METHODS: [&str; 2] = ["GET", "POST"];
const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Error returned when the configured origin cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum CorsOriginError {
    #[error("invalid CORS origin {origin:?}: {source}")]
    InvalidHeader {
        origin: String,
        #[source]
        source: InvalidHeaderValue,
    },
    #[error("invalid CORS origin {origin:?}: not an origin URI")]
    InvalidUri { origin: String },
}

/// Validated CORS policy.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use tidewatch::middleware::CorsPolicy;
///
/// let policy = CorsPolicy::new("*").expect("valid origin");
/// let app = App::new().wrap(policy.middleware());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    allow_origin: String,
}

impl CorsPolicy {
    /// Build a policy for `origin` (`*` allows any origin).
    pub fn new(origin: &str) -> Result<Self, CorsOriginError> {
        let trimmed = origin.trim();
        HeaderValue::from_str(trimmed).map_err(|source| CorsOriginError::InvalidHeader {
            origin: origin.to_owned(),
            source,
        })?;
        if trimmed != ANY_ORIGIN && trimmed.parse::<Uri>().is_err() {
            return Err(CorsOriginError::InvalidUri {
                origin: origin.to_owned(),
            });
        }
        Ok(Self {
            allow_origin: trimmed.to_owned(),
        })
    }

    pub fn allow_origin(&self) -> &str {
        &self.allow_origin
    }

    /// Middleware enforcing the policy; `*` is sent back literally.
    pub fn middleware(&self) -> Cors {
        let cors = if self.allow_origin == ANY_ORIGIN {
            Cors::default().allow_any_origin().send_wildcard()
        } else {
            Cors::default().allowed_origin(&self.allow_origin)
        };
        cors.allowed_methods(ALLOWED_METHODS)
            .allowed_headers([CONTENT_TYPE, ACCEPT])
            .expose_headers([TRACE_ID_HEADER])
            .max_age(PREFLIGHT_MAX_AGE_SECS)
    }
}
