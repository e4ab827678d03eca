//! Builders wiring the persistence adapter into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use tidewatch::domain::UserDirectoryService;
use tidewatch::inbound::http::state::HttpState;
use tidewatch::outbound::persistence::{DbPool, DieselUserDirectoryRepository};

/// Build handler state backed by the Diesel repository.
///
/// One [`UserDirectoryService`] serves both registration and lookup.
pub(super) fn build_http_state(pool: DbPool) -> web::Data<HttpState> {
    let repository = Arc::new(DieselUserDirectoryRepository::new(pool));
    let service = Arc::new(UserDirectoryService::new(
        repository,
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::new(service.clone(), service))
}
