//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_directory_repository;
mod user_lookup;
mod user_registration;

#[cfg(test)]
pub use user_directory_repository::MockUserDirectoryRepository;
pub use user_directory_repository::{UserDirectoryRepository, UserDirectoryRepositoryError};
#[cfg(test)]
pub use user_lookup::MockUserLookup;
pub use user_lookup::UserLookup;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
