//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of domain repository ports backed by PostgreSQL
//! via `diesel-async` and `bb8` connection pooling.
//!
//! Diesel row structs (`models.rs`) and schema definitions (`schema.rs`) are
//! internal; the domain only ever sees its own types.
//!
//! # Example
//!
//! ```no_run
//! use tidewatch::outbound::persistence::{DbPool, DieselUserDirectoryRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), tidewatch::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tidewatch")).await?;
//! let repo = DieselUserDirectoryRepository::new(pool);
//! # drop(repo);
//! # Ok(())
//! # }
//! ```

mod diesel_user_directory_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_directory_repository::DieselUserDirectoryRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, apply_pending_migrations, run_pending_migrations,
};
pub use pool::{DbPool, PoolConfig, PoolError};
