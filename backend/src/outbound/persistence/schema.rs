//! Diesel table definitions for the PostgreSQL schema.
//!
//! Kept in sync with `backend/migrations` by hand; regenerate with
//! `diesel print-schema` after adding a migration.

diesel::table! {
    /// Registered people.
    ///
    /// `email` and `phone_number` each carry a unique index; inserts that
    /// reuse either value fail with a unique violation.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Trimmed, lower-cased email address.
        email -> Varchar,
        /// Canonical decimal-digit phone number.
        phone_number -> Varchar,
        city -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
