//! Tidewatch backend: the user directory behind the coastal-safety app.
//!
//! The crate follows a hexagonal layout. `domain` holds the user types, the
//! registration/lookup service and its ports; `inbound::http` adapts the
//! ports to actix-web; `outbound::persistence` implements the repository port
//! on PostgreSQL with Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
