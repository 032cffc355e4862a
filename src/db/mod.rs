pub mod patients;
pub mod sqlite;
pub mod users;

pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Password too short: minimum {minimum} characters")]
    PasswordTooShort { minimum: usize },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}
