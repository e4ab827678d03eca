//! PostgreSQL-backed `UserDirectoryRepository` implementation using Diesel ORM.
//!
//! Uniqueness of email and phone number is enforced by the `users` table's
//! unique indexes; a rejected insert surfaces as
//! [`UserDirectoryRepositoryError::DuplicateKey`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserDirectoryRepository, UserDirectoryRepositoryError};
use crate::domain::{EmailAddress, LookupCredentials, PhoneNumber, UserRecord, UserRecordParts};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserDirectoryRepository` port.
#[derive(Clone)]
pub struct DieselUserDirectoryRepository {
    pool: DbPool,
}

impl DieselUserDirectoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserDirectoryRepositoryError {
    UserDirectoryRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserDirectoryRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            UserDirectoryRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => UserDirectoryRepositoryError::duplicate_key(
                info.constraint_name().unwrap_or("users unique index"),
            ),
            DatabaseErrorKind::ClosedConnection => {
                UserDirectoryRepositoryError::connection("database connection error")
            }
            _ => UserDirectoryRepositoryError::query("database error"),
        },
        _ => UserDirectoryRepositoryError::query("database error"),
    }
}

fn row_to_record(row: UserRow) -> Result<UserRecord, UserDirectoryRepositoryError> {
    let id = row.id;
    UserRecord::try_from_parts(UserRecordParts {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        phone_number: row.phone_number,
        city: row.city,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| UserDirectoryRepositoryError::query(format!("corrupt user row {id}: {err}")))
}

#[async_trait]
impl UserDirectoryRepository for DieselUserDirectoryRepository {
    async fn find_by_email_or_phone(
        &self,
        email: &EmailAddress,
        phone_number: &PhoneNumber,
    ) -> Result<Option<UserRecord>, UserDirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(
                users::email
                    .eq(email.as_ref())
                    .or(users::phone_number.eq(phone_number.as_ref())),
            )
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn insert(&self, record: &UserRecord) -> Result<(), UserDirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *record.id().as_uuid(),
            first_name: record.first_name(),
            last_name: record.last_name(),
            email: record.email().as_ref(),
            phone_number: record.phone_number().as_ref(),
            city: record.city(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_credentials(
        &self,
        credentials: &LookupCredentials,
    ) -> Result<Option<UserRecord>, UserDirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(credentials.email().as_ref()))
            .filter(users::phone_number.eq(credentials.phone_number().as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }
}
