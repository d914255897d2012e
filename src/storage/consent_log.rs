//! SQLite-backed append-only consent log
//!
//! The database is opened for each operation and closed again afterwards, so
//! no connection is held between events.

use crate::{storage::entry::ConsentLogEntry, Error, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Append-only log of user actions
#[derive(Debug, Clone)]
pub struct ConsentLog {
    path: PathBuf,
}

impl ConsentLog {
    /// Create a log handle for a database file
    ///
    /// The parent directory is created if it does not exist. The schema is not
    /// touched until [`ConsentLog::init`] is called.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Storage(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        Ok(Self { path })
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `consent_log` table if it does not exist yet
    pub fn init(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS consent_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                username TEXT,
                first_name TEXT,
                last_name TEXT,
                action TEXT NOT NULL,
                consent_flag INTEGER,
                ts_utc TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Append one entry to the log
    ///
    /// Any persistence failure is returned to the caller as-is.
    pub fn append(&self, entry: &ConsentLogEntry) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO consent_log (user_id, username, first_name, last_name, action, consent_flag, ts_utc)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.user.id,
                &entry.user.username,
                &entry.user.first_name,
                &entry.user.last_name,
                entry.action.as_str(),
                entry.consent_flag,
                entry.timestamp.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path)
            .map_err(|e| Error::Storage(format!("Failed to open database: {}", e)))
    }
}
