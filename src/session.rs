//! Per-session interactive state.
//!
//! An explicit context object passed to the views rather than ambient
//! globals: authenticated flag, active user, login timestamp, and the
//! currently loaded dataset. Reset wholesale on logout.

use chrono::{DateTime, Local};
use rusqlite::Connection;

use crate::dataset::DataTable;
use crate::db::{users, DatabaseError};

#[derive(Debug, Default)]
pub struct SessionContext {
    authenticated: bool,
    user: Option<String>,
    login_time: Option<DateTime<Local>>,
    dataset: Option<DataTable>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts a credential login. On success the session becomes
    /// authenticated and the login timestamp is recorded; on a mismatch
    /// nothing changes and `false` is returned.
    pub fn login(
        &mut self,
        conn: &Connection,
        username: &str,
        password: &str,
    ) -> Result<bool, DatabaseError> {
        if !users::verify_login(conn, username, password)? {
            return Ok(false);
        }
        self.authenticated = true;
        self.user = Some(username.to_string());
        self.login_time = Some(Local::now());
        tracing::info!(user = username, "session authenticated");
        Ok(true)
    }

    /// Clears all session state, including the loaded dataset.
    pub fn logout(&mut self) {
        if let Some(user) = &self.user {
            tracing::info!(user, "session ended");
        }
        *self = Self::default();
    }

    /// Replaces the active dataset wholesale. Later loads never merge.
    pub fn load_dataset(&mut self, table: DataTable) {
        tracing::debug!(rows = table.len(), "dataset loaded");
        self.dataset = Some(table);
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn login_time(&self) -> Option<DateTime<Local>> {
        self.login_time
    }

    pub fn dataset(&self) -> Option<&DataTable> {
        self.dataset.as_ref()
    }
}
