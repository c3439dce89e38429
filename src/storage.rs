//! Local persistence for cases, the activity log, and volunteer profiles.
//!
//! Everything lives in one `SQLite` file:
//!
//! ```text
//! ~/.solidarity/solidarity.sqlite
//!   cases        # One row per case report
//!   activities   # Append-only volunteer activity log
//!   volunteers   # One JSON profile per volunteer identity
//!   reviews      # Community ratings of volunteers
//! ```
//!
//! Timestamps are stored as RFC 3339 text, enums as their kebab-case names,
//! and string lists as JSON arrays.

mod activity;
mod case;
mod profile;

use std::{fs, path::Path, path::PathBuf};

use rusqlite::Connection;
use tracing::debug;
use uuid::Uuid;

use crate::model::{CaseReport, VolunteerActivity};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("case not found: {0}")]
    CaseNotFound(Uuid),

    #[error("case already exists: {0}")]
    CaseAlreadyExists(Uuid),

    #[error("volunteer not found: {0}")]
    VolunteerNotFound(String),

    #[error("volunteer already exists: {0}")]
    VolunteerAlreadyExists(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS cases (
        id          TEXT PRIMARY KEY,
        kind        TEXT NOT NULL,
        lat         REAL NOT NULL,
        lng         REAL NOT NULL,
        address     TEXT,
        description TEXT NOT NULL,
        urgency     TEXT NOT NULL,
        status      TEXT NOT NULL,
        reported_at TEXT NOT NULL,
        helped_at   TEXT,
        helped_by   TEXT,
        tags        TEXT NOT NULL DEFAULT '[]'
    );

    CREATE TABLE IF NOT EXISTS activities (
        id               TEXT PRIMARY KEY,
        volunteer_id     TEXT NOT NULL,
        case_id          TEXT NOT NULL,
        action           TEXT NOT NULL,
        timestamp        TEXT NOT NULL,
        lat              REAL,
        lng              REAL,
        notes            TEXT,
        duration_minutes INTEGER,
        resources        TEXT NOT NULL DEFAULT '[]'
    );

    CREATE TABLE IF NOT EXISTS volunteers (
        id      TEXT PRIMARY KEY,
        profile TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS reviews (
        id           TEXT PRIMARY KEY,
        reviewer_id  TEXT NOT NULL,
        volunteer_id TEXT NOT NULL,
        case_id      TEXT NOT NULL,
        rating       INTEGER NOT NULL,
        comment      TEXT,
        timestamp    TEXT NOT NULL,
        anonymous    INTEGER NOT NULL DEFAULT 0
    );
";

/// Local `SQLite`-backed storage for cases and activities.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the database at `path`.
    ///
    /// The parent directory and schema are created if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %path.display(), "storage opened");
        Ok(Self { conn })
    }

    /// Returns the default database path: `~/.solidarity/solidarity.sqlite`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".solidarity").join("solidarity.sqlite"))
    }

    /// Stores a new case and the activity that reported it, atomically.
    pub fn record_report(&self, case: &CaseReport, activity: &VolunteerActivity) -> Result<()> {
        self.with_transaction(|conn| {
            case::insert_case_on(conn, case)?;
            activity::append_activity_on(conn, activity)
        })
    }

    /// Writes a case's new status and the activity that caused it, atomically.
    ///
    /// If either write fails, neither is kept.
    pub fn advance_case(&self, case: &CaseReport, activity: &VolunteerActivity) -> Result<()> {
        self.with_transaction(|conn| {
            case::update_case_on(conn, case)?;
            activity::append_activity_on(conn, activity)
        })
    }

    /// Runs `f` inside a transaction. Commits on `Ok`, rolls back on `Err`.
    fn with_transaction<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

/// Parses a stored RFC 3339 timestamp.
fn parse_timestamp(field: &str, value: &str) -> Result<jiff::Timestamp> {
    value
        .parse()
        .map_err(|e| StorageError::Corrupt(format!("invalid {field}: {e}")))
}

/// Parses a stored UUID.
fn parse_uuid(field: &str, value: &str) -> Result<Uuid> {
    value
        .parse()
        .map_err(|e| StorageError::Corrupt(format!("invalid {field}: {e}")))
}
