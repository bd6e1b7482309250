//! Store error types

use thiserror::Error;

use super::record::RecordId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row with this id
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Underlying SQLite failure (open, statement, commit)
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Persisted row violates the record invariants
    #[error("corrupt row {id}: {reason}")]
    Corrupt { id: RecordId, reason: String },

    /// In-process store lock was poisoned by a panicking writer
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// True for the not-found case
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
