//! SQLite breach store backed by libSQL in local mode.
//!
//! # Schema
//!
//! ```text
//! compromised_emails(
//!     id          INTEGER PRIMARY KEY,
//!     email_hash  TEXT UNIQUE,      -- 64 hex chars
//!     breach_date TEXT,             -- RFC 3339
//!     created_at  TEXT DEFAULT CURRENT_TIMESTAMP
//! )
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use libsql::{params, Builder, Connection, Database};
use tracing::{debug, info, instrument};

use breachwatch_core::error::{BreachError, Result};
use breachwatch_core::traits::BreachStore;
use breachwatch_core::types::{BreachRecord, EmailHash};

const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS compromised_emails (
    id INTEGER PRIMARY KEY,
    email_hash VARCHAR(64) UNIQUE,
    breach_date TIMESTAMP,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const LOOKUP: &str = "SELECT COUNT(*) FROM compromised_emails WHERE email_hash = ?1";
const INSERT: &str =
    "INSERT OR IGNORE INTO compromised_emails (email_hash, breach_date) VALUES (?1, ?2)";
const COUNT: &str = "SELECT COUNT(*) FROM compromised_emails";

fn db_err(e: libsql::Error) -> BreachError {
    BreachError::Database(e.to_string())
}

/// SQLite-backed breach store.
///
/// Holds a single connection for the lifetime of the store. The database
/// file and table are created on open if missing.
pub struct SqliteStore {
    path: PathBuf,
    // Kept alive for the connection's sake
    _db: Database,
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let db = Builder::new_local(&path).build().await.map_err(db_err)?;
        let conn = db.connect().map_err(db_err)?;

        // journal_mode answers with a row, so it goes through query()
        conn.query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(db_err)?;
        conn.execute(CREATE_TABLE, ()).await.map_err(db_err)?;

        info!("Breach database initialized");
        Ok(Self {
            path,
            _db: db,
            conn,
        })
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn query_count(&self, sql: &str, params: impl libsql::params::IntoParams) -> Result<u64> {
        let mut rows = self.conn.query(sql, params).await.map_err(db_err)?;
        let row = rows
            .next()
            .await
            .map_err(db_err)?
            .ok_or_else(|| BreachError::Database("COUNT returned no rows".into()))?;
        let count: i64 = row.get(0).map_err(db_err)?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl BreachStore for SqliteStore {
    #[instrument(skip(self, key), fields(key = key.short()))]
    async fn lookup(&self, key: &EmailHash) -> Result<bool> {
        let count = self
            .query_count(LOOKUP, params![key.to_string()])
            .await
            .map_err(|e| BreachError::StoreUnavailable(e.to_string()))?;
        Ok(count > 0)
    }

    #[instrument(skip(self, record), fields(key = record.email_hash.short()))]
    async fn insert(&self, record: BreachRecord) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                INSERT,
                params![record.email_hash.to_string(), record.breached_at.to_rfc3339()],
            )
            .await
            .map_err(db_err)?;
        debug!(inserted = changed > 0, "Inserted breach record");
        Ok(changed > 0)
    }

    async fn count(&self) -> Result<u64> {
        self.query_count(COUNT, ()).await
    }
}
