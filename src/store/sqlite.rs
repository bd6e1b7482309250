//! SQLite-backed record store
//!
//! # Invariants
//! - Every operation runs in its own session from the `SessionFactory`.
//! - Writes run inside one `IMMEDIATE` transaction; any failure before
//!   `commit()` drops the transaction, which rolls it back.
//! - Read paths reject rows that violate the record invariants instead of
//!   masking them.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::observability::{Logger, ObservationScope};

use super::errors::{StoreError, StoreResult};
use super::record::{ListOrder, NewRecord, Record, RecordId, RecordPatch};
use super::session::SessionFactory;
use super::RecordStore;

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS records (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL CHECK (name <> ''),
    category TEXT NOT NULL CHECK (category <> ''),
    amount   REAL NOT NULL CHECK (amount >= 0)
);";

const RECORD_SELECT_SQL: &str = "SELECT id, name, category, amount FROM records";

/// File-backed store over one SQLite table
pub struct SqliteRecordStore {
    sessions: SessionFactory,
}

impl SqliteRecordStore {
    /// Open the store and create the `records` table if it is absent
    pub fn open(sessions: SessionFactory) -> StoreResult<Self> {
        let store = Self { sessions };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> StoreResult<()> {
        let path = self.sessions.path().display().to_string();
        let scope = ObservationScope::with_fields("SCHEMA_BOOTSTRAP", &[("path", path.as_str())]);

        let result = self
            .sessions
            .open()
            .and_then(|session| Ok(session.connection().execute_batch(SCHEMA_SQL)?));

        match &result {
            Ok(()) => scope.complete(),
            Err(e) => scope.fail(&e.to_string()),
        }
        result
    }
}

impl RecordStore for SqliteRecordStore {
    fn list(&self, order: ListOrder) -> StoreResult<Vec<Record>> {
        let session = self.sessions.open()?;
        let sql = format!("{RECORD_SELECT_SQL} ORDER BY id {}", order.sql_keyword());

        let mut stmt = session.connection().prepare(&sql)?;
        let rows = stmt.query_map([], row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(check_row(row?)?);
        }
        Ok(records)
    }

    fn create(&self, new: &NewRecord) -> StoreResult<Record> {
        let mut session = self.sessions.open()?;
        let tx = session.begin()?;

        tx.execute(
            "INSERT INTO records (name, category, amount) VALUES (?1, ?2, ?3)",
            params![new.name.as_str(), new.category.as_str(), new.amount],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Logger::trace("RECORD_INSERTED", &[("id", id.to_string().as_str())]);
        Ok(new.clone().into_record(id))
    }

    fn update(&self, id: RecordId, patch: &RecordPatch) -> StoreResult<Record> {
        let mut session = self.sessions.open()?;
        let tx = session.begin()?;

        let mut record = find_record(&tx, id)?.ok_or(StoreError::NotFound(id))?;
        patch.apply_to(&mut record);

        if !patch.is_empty() {
            tx.execute(
                "UPDATE records SET name = ?1, category = ?2, amount = ?3 WHERE id = ?4",
                params![
                    record.name.as_str(),
                    record.category.as_str(),
                    record.amount,
                    id
                ],
            )?;
        }
        tx.commit()?;

        Ok(record)
    }

    fn delete(&self, id: RecordId) -> StoreResult<()> {
        let mut session = self.sessions.open()?;
        let tx = session.begin()?;

        if find_record(&tx, id)?.is_none() {
            return Err(StoreError::NotFound(id));
        }
        tx.execute("DELETE FROM records WHERE id = ?1", params![id])?;
        tx.commit()?;

        Ok(())
    }
}

fn find_record(conn: &Connection, id: RecordId) -> StoreResult<Option<Record>> {
    let record = conn
        .query_row(
            &format!("{RECORD_SELECT_SQL} WHERE id = ?1"),
            params![id],
            row_to_record,
        )
        .optional()?;
    record.map(check_row).transpose()
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
    })
}

fn check_row(record: Record) -> StoreResult<Record> {
    let reason = if record.name.is_empty() {
        Some("empty name")
    } else if record.category.is_empty() {
        Some("empty category")
    } else if !record.amount.is_finite() || record.amount < 0.0 {
        Some("amount is not a non-negative finite number")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StoreError::Corrupt {
            id: record.id,
            reason: reason.to_string(),
        }),
        None => Ok(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, SqliteRecordStore) {
        let dir = TempDir::new().unwrap();
        let factory = SessionFactory::new(dir.path().join("records.db"));
        let store = SqliteRecordStore::open(factory).unwrap();
        (dir, store)
    }

    fn new_record(name: &str, amount: f64) -> NewRecord {
        NewRecord {
            name: name.to_string(),
            category: "Ops".to_string(),
            amount,
        }
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.db");

        let first = SqliteRecordStore::open(SessionFactory::new(&path)).unwrap();
        first.create(&new_record("a", 1.0)).unwrap();

        let second = SqliteRecordStore::open(SessionFactory::new(&path)).unwrap();
        assert_eq!(second.list(ListOrder::Ascending).unwrap().len(), 1);
    }

    #[test]
    fn test_open_fails_on_non_database_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.db");
        std::fs::write(&path, vec![b'x'; 4096]).unwrap();

        let err = SqliteRecordStore::open(SessionFactory::new(&path)).err().unwrap();
        assert!(matches!(err, StoreError::Sqlite(_)));
    }

    #[test]
    fn test_list_respects_order() {
        let (_dir, store) = open_temp();
        let a = store.create(&new_record("a", 1.0)).unwrap();
        let b = store.create(&new_record("b", 2.0)).unwrap();

        let asc: Vec<_> = store
            .list(ListOrder::Ascending)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        let desc: Vec<_> = store
            .list(ListOrder::Descending)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(asc, vec![a.id, b.id]);
        assert_eq!(desc, vec![b.id, a.id]);
    }

    #[test]
    fn test_empty_patch_returns_current_row() {
        let (_dir, store) = open_temp();
        let created = store.create(&new_record("a", 3.5)).unwrap();

        let updated = store.update(created.id, &RecordPatch::default()).unwrap();
        assert_eq!(updated, created);
    }

    #[test]
    fn test_table_constraints_reject_empty_name() {
        let (_dir, store) = open_temp();
        let err = store.create(&new_record("", 1.0)).unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)));
        assert!(store.list(ListOrder::Ascending).unwrap().is_empty());
    }

    #[test]
    fn test_check_row_flags_negative_amount() {
        let err = check_row(Record {
            id: 3,
            name: "a".to_string(),
            category: "b".to_string(),
            amount: -1.0,
        })
        .unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { id: 3, .. }));
    }
}
