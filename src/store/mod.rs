//! # Record Store
//!
//! Persistence for the single `records` table.
//!
//! The HTTP layer receives one `SharedStore` built at startup and never
//! reaches a global engine. `SqliteRecordStore` is the production
//! implementation; `MemoryRecordStore` backs `:memory:` deployments and
//! tests.

mod errors;
mod memory;
mod record;
mod session;
mod sqlite;

use std::sync::Arc;
use std::time::Duration;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryRecordStore;
pub use record::{ListOrder, NewRecord, Record, RecordId, RecordPatch};
pub use session::{Session, SessionFactory, DEFAULT_BUSY_TIMEOUT};
pub use sqlite::SqliteRecordStore;

/// Database path that selects the in-process store
pub const MEMORY_DATABASE: &str = ":memory:";

/// CRUD operations over the record table
///
/// Each call is one independent logical transaction.
pub trait RecordStore: Send + Sync {
    /// All records, ordered by id in the given direction
    fn list(&self, order: ListOrder) -> StoreResult<Vec<Record>>;

    /// Insert a record and return it with its assigned id
    fn create(&self, new: &NewRecord) -> StoreResult<Record>;

    /// Apply a patch and return the updated record
    fn update(&self, id: RecordId, patch: &RecordPatch) -> StoreResult<Record>;

    /// Remove a record
    fn delete(&self, id: RecordId) -> StoreResult<()>;
}

/// Store handle shared by every request
pub type SharedStore = Arc<dyn RecordStore>;

/// Open the store for a configured database path
pub fn open_store(database_path: &str, busy_timeout: Duration) -> StoreResult<SharedStore> {
    if database_path == MEMORY_DATABASE {
        return Ok(Arc::new(MemoryRecordStore::new()));
    }

    let sessions = SessionFactory::new(database_path).with_busy_timeout(busy_timeout);
    Ok(Arc::new(SqliteRecordStore::open(sessions)?))
}
