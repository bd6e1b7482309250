//! Scoped database sessions
//!
//! A `SessionFactory` is built once at startup and bound to one database
//! file. Every operation calls `open()` for its own `Session`; the
//! connection closes when the session is dropped, on every exit path.
//!
//! Write transactions begin `IMMEDIATE` so a lookup followed by a write
//! holds the file's write lock for the whole transaction. A
//! `rusqlite::Transaction` that is dropped without `commit()` rolls back.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::observability::Logger;

use super::errors::StoreResult;

/// Default wait for a locked database file
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens per-request sessions against one database file
#[derive(Debug, Clone)]
pub struct SessionFactory {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SessionFactory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Override how long a session waits on a locked file
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Database file backing every session
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a new session
    pub fn open(&self) -> StoreResult<Session> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;
        Logger::trace("SESSION_OPENED", &[("path", self.path.display().to_string().as_str())]);
        Ok(Session { conn })
    }
}

/// One short-lived connection, owned by a single operation
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Connection for reads outside an explicit transaction
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a write transaction
    pub fn begin(&mut self) -> StoreResult<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        Logger::trace("SESSION_CLOSED", &[]);
    }
}
