//! In-process record store
//!
//! Same semantics as the SQLite store: ids start at 1, increase strictly
//! and are never reused after a delete. Selected for `:memory:` databases
//! and used as a fake in tests.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::record::{ListOrder, NewRecord, Record, RecordId, RecordPatch};
use super::RecordStore;

#[derive(Debug)]
struct Table {
    rows: BTreeMap<RecordId, Record>,
    next_id: RecordId,
}

/// Record store held in process memory
#[derive(Debug)]
pub struct MemoryRecordStore {
    table: RwLock<Table>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryRecordStore {
    fn list(&self, order: ListOrder) -> StoreResult<Vec<Record>> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        let rows = table.rows.values().cloned();
        Ok(match order {
            ListOrder::Ascending => rows.collect(),
            ListOrder::Descending => rows.rev().collect(),
        })
    }

    fn create(&self, new: &NewRecord) -> StoreResult<Record> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        let id = table.next_id;
        table.next_id += 1;

        let record = new.clone().into_record(id);
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    fn update(&self, id: RecordId, patch: &RecordPatch) -> StoreResult<Record> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        let record = table.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        patch.apply_to(record);
        Ok(record.clone())
    }

    fn delete(&self, id: RecordId) -> StoreResult<()> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
