//! Durable-slot repository contracts and implementations.
//!
//! # Responsibility
//! - Provide the read/overwrite contract for one named payload slot.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - SQLite-backed construction rejects connections whose schema has not
//!   been migrated.
//! - Writes replace the prior payload wholesale; there is no append path.

use crate::db::{migrations, DbError};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} has not been migrated to {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table is missing: {table}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Single-key durable storage for serialized session state.
pub trait SlotRepository {
    /// Reads the payload stored under `key`, if any.
    fn read(&self, key: &str) -> RepoResult<Option<String>>;

    /// Overwrites the payload stored under `key`.
    fn write(&self, key: &str, payload: &str) -> RepoResult<()>;
}

/// SQLite-backed slot repository.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when the `slots` table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version == 0 {
            return Err(RepoError::UninitializedConnection {
                expected_version: migrations::latest_version(),
                actual_version,
            });
        }

        let slots_table: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'slots';",
            [],
            |row| row.get(0),
        )?;
        if slots_table == 0 {
            return Err(RepoError::MissingRequiredTable("slots"));
        }

        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row("SELECT payload FROM slots WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(payload)
    }

    fn write(&self, key: &str, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;
        debug!(
            "event=slot_write module=repo status=ok key={key} bytes={}",
            payload.len()
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemorySlots {
    entries: BTreeMap<String, String>,
    write_count: usize,
}

/// In-memory slot repository.
///
/// The injected-storage fake for tests and ephemeral sessions. Clones share
/// one underlying map, so a caller can keep an inspection handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotRepository {
    inner: Rc<RefCell<MemorySlots>>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with one slot entry.
    pub fn with_entry(key: &str, payload: &str) -> Self {
        let repo = Self::default();
        repo.inner
            .borrow_mut()
            .entries
            .insert(key.to_string(), payload.to_string());
        repo
    }

    /// Total writes accepted since construction.
    pub fn write_count(&self) -> usize {
        self.inner.borrow().write_count
    }
}

impl SlotRepository for MemorySlotRepository {
    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.inner.borrow().entries.get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> RepoResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.write_count += 1;
        inner.entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
