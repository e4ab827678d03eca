//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UserLookup, UserRegistration};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub lookup: Arc<dyn UserLookup>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// One `UserDirectoryService` usually backs both ports.
    pub fn new(registration: Arc<dyn UserRegistration>, lookup: Arc<dyn UserLookup>) -> Self {
        Self {
            registration,
            lookup,
        }
    }
}
