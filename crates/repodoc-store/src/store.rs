//! SQLite-backed user store.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, Row, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::types::{ProviderProfile, UserRecord};

/// Current schema version for migrations.
const SCHEMA_VERSION: i32 = 1;

/// User store backed by SQLite.
///
/// Uses WAL mode for better concurrent read performance. All writes are
/// single-row statements, so the provider-ID upsert is atomic.
pub struct UserStore {
    /// The SQLite connection (wrapped in Mutex for thread safety).
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore").finish_non_exhaustive()
    }
}

impl UserStore {
    /// Open or create a user store at the given path.
    ///
    /// Creates the database file and initializes the schema if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_FULL_MUTEX,
        )?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;

        info!("User store opened at {:?}", path);
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let current_version: i32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap_or(0);

        if current_version >= SCHEMA_VERSION {
            debug!("Schema up to date (version {})", current_version);
            return Ok(());
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                github_id INTEGER NOT NULL UNIQUE,
                login TEXT NOT NULL,
                name TEXT,
                email TEXT,
                avatar TEXT,
                access_token TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(())
    }

    /// Create or update the record for a provider identity.
    ///
    /// First login creates the record with profile and credential; every
    /// later login overwrites the credential only. One atomic write either
    /// way, so the record count per provider ID never exceeds one.
    pub fn upsert_by_github_id(
        &self,
        profile: &ProviderProfile,
        access_token: &str,
    ) -> Result<UserRecord> {
        {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                r#"
                INSERT INTO users (id, github_id, login, name, email, avatar, access_token, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(github_id) DO UPDATE SET access_token = excluded.access_token
                "#,
                params![
                    Uuid::new_v4().to_string(),
                    profile.github_id,
                    profile.login,
                    profile.name,
                    profile.email,
                    profile.avatar,
                    access_token,
                    Utc::now().to_rfc3339(),
                ],
            )?;
        }

        debug!(github_id = profile.github_id, "Upserted user record");

        self.find_by_github_id(profile.github_id)?
            .ok_or_else(|| StoreError::Corrupt("upserted row not found".to_string()))
    }

    /// Look up a record by internal identifier.
    pub fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        self.find_where("id = ?1", params![id])
    }

    /// Look up a record by provider identifier.
    pub fn find_by_github_id(&self, github_id: i64) -> Result<Option<UserRecord>> {
        self.find_where("github_id = ?1", params![github_id])
    }

    /// Remove the stored credential for a record.
    ///
    /// Leaves the record itself in place; until the user re-authenticates,
    /// protected requests are rejected with a re-authenticate instruction.
    pub fn clear_credential(&self, id: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE users SET access_token = NULL WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    /// Total number of stored records.
    pub fn count(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    fn find_where(
        &self,
        predicate: &str,
        args: impl rusqlite::Params,
    ) -> Result<Option<UserRecord>> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT id, github_id, login, name, email, avatar, access_token, created_at \
             FROM users WHERE {predicate}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(args)?;

        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_user(row)?)),
            None => Ok(None),
        }
    }

    fn row_to_user(row: &Row<'_>) -> Result<UserRecord> {
        let created_at: String = row.get(7)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| StoreError::Corrupt(format!("created_at: {e}")))?
            .with_timezone(&Utc);

        Ok(UserRecord {
            id: row.get(0)?,
            github_id: row.get(1)?,
            login: row.get(2)?,
            name: row.get(3)?,
            email: row.get(4)?,
            avatar: row.get(5)?,
            access_token: row.get(6)?,
            created_at,
        })
    }
}
