//! Request middleware: trace identifiers and cross-origin headers.

pub mod cors;
pub mod trace;

pub use cors::{CorsOriginError, CorsPolicy};
pub use trace::Trace;
