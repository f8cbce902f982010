//! Storage layer for the per-file time tracker.
//!
//! Provides a durable [`TimeStore`] backed by `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! The tracker runs on a single event thread and owns the only `Database`, so
//! no extra synchronization is needed.
//!
//! # Schema
//!
//! One row per tracked file, keyed by absolute path. Totals are whole seconds.
//! `updated_at` is an ISO 8601 UTC timestamp (e.g., `2024-01-15T10:30:00.000Z`)
//! refreshed on every write.
//!
//! Rows are never deleted: a reset stores zero. Enumeration follows `rowid`,
//! so paths come back in the order they were first tracked.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use ft_core::TimeStore;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A total does not fit in an SQLite integer.
    #[error("total seconds out of range for {path}: {seconds}")]
    SecondsOutOfRange { path: String, seconds: u64 },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// A stored row, including when it was last written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTimeRecord {
    pub path: String,
    pub total_seconds: u64,
    pub updated_at: String,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS file_times (
                path TEXT PRIMARY KEY,
                total_seconds INTEGER NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the stored total for `path`, or 0 if it was never tracked.
    pub fn total_seconds(&self, path: &str) -> Result<u64, DbError> {
        let seconds: Option<i64> = self
            .conn
            .query_row(
                "SELECT total_seconds FROM file_times WHERE path = ?",
                [path],
                |row| row.get(0),
            )
            .optional()?;
        Ok(seconds.map_or(0, clamp_seconds))
    }

    /// Overwrites the stored total for `path`.
    pub fn set_total_seconds(&self, path: &str, seconds: u64) -> Result<(), DbError> {
        self.set_total_seconds_at(path, seconds, Utc::now())
    }

    fn set_total_seconds_at(
        &self,
        path: &str,
        seconds: u64,
        now: DateTime<Utc>,
    ) -> Result<(), DbError> {
        let stored = i64::try_from(seconds).map_err(|_| DbError::SecondsOutOfRange {
            path: path.to_string(),
            seconds,
        })?;
        self.conn.execute(
            "
            INSERT INTO file_times (path, total_seconds, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(path) DO UPDATE SET
                total_seconds = excluded.total_seconds,
                updated_at = excluded.updated_at
            ",
            params![path, stored, format_timestamp(now)],
        )?;
        Ok(())
    }

    /// Lists every tracked path in first-tracked order.
    pub fn list_paths(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT path FROM file_times ORDER BY rowid ASC")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut paths = Vec::new();
        for row in rows {
            paths.push(row?);
        }
        Ok(paths)
    }

    /// Lists every row in first-tracked order.
    pub fn list_files(&self) -> Result<Vec<FileTimeRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT path, total_seconds, updated_at
            FROM file_times
            ORDER BY rowid ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(FileTimeRecord {
                path: row.get(0)?,
                total_seconds: clamp_seconds(row.get(1)?),
                updated_at: row.get(2)?,
            })
        })?;
        let mut files = Vec::new();
        for row in rows {
            files.push(row?);
        }
        Ok(files)
    }
}

impl TimeStore for Database {
    type Error = DbError;

    fn get(&self, path: &str) -> Result<u64, Self::Error> {
        self.total_seconds(path)
    }

    fn set(&mut self, path: &str, total_seconds: u64) -> Result<(), Self::Error> {
        self.set_total_seconds(path, total_seconds)
    }

    fn keys(&self) -> Result<Vec<String>, Self::Error> {
        self.list_paths()
    }
}

/// Stored values are trusted as-is, except that negatives read as zero.
fn clamp_seconds(seconds: i64) -> u64 {
    u64::try_from(seconds).unwrap_or(0)
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
