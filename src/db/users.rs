//! Local credential table: registration and login lookups.
//!
//! Passwords are stored as a single unsalted SHA-256 hex digest. That is a
//! deliberate placeholder matching the scope of this system — it is NOT
//! production-grade credential storage (no per-user salt, no key
//! stretching, no lockout).

use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};

use super::DatabaseError;
use crate::config;
use crate::models::UserAccount;

/// Deterministic one-way digest used for stored passwords.
pub fn hash_password(password: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Registers a new account.
///
/// Fails with `DuplicateUsername` when the username is taken (the stored
/// row is untouched) and `PasswordTooShort` below the configured minimum.
pub fn register(
    conn: &Connection,
    username: &str,
    password: &str,
    email: &str,
) -> Result<(), DatabaseError> {
    if password.len() < config::PASSWORD_MIN_LENGTH {
        return Err(DatabaseError::PasswordTooShort {
            minimum: config::PASSWORD_MIN_LENGTH,
        });
    }

    let created_date = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let result = conn.execute(
        "INSERT INTO users (username, password, email, created_date) VALUES (?1, ?2, ?3, ?4)",
        params![username, hash_password(password), email, created_date],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(DatabaseError::DuplicateUsername(username.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// True iff a row matches `(username, hash(password))`.
///
/// No attempt counting, no lockout, no token issuance — the result only
/// flips in-process session state.
pub fn verify_login(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<bool, DatabaseError> {
    let found: Option<String> = conn
        .query_row(
            "SELECT username FROM users WHERE username = ?1 AND password = ?2",
            params![username, hash_password(password)],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Fetches an account row for profile display. Digest included as stored.
pub fn get_user(conn: &Connection, username: &str) -> Result<Option<UserAccount>, DatabaseError> {
    conn.query_row(
        "SELECT username, password, email, created_date FROM users WHERE username = ?1",
        params![username],
        |row| {
            Ok(UserAccount {
                username: row.get(0)?,
                password: row.get(1)?,
                email: row.get(2)?,
                created_date: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(DatabaseError::from)
}
