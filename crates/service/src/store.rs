use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};

use tokio::sync::RwLock;

use common::types::Record;

use crate::errors::StoreError;

/// In-memory record store: a map guarded by a read/write lock plus an
/// atomic id counter.
///
/// The counter is not covered by the map lock. Id allocation and map
/// insertion are two separate atomic steps; concurrent creates are
/// strictly ordered in the counter but may commit to the map in a
/// different relative order. Keys are never reused, even after delete.
#[derive(Clone, Default)]
pub struct RecordStore {
    records: Arc<RwLock<HashMap<u32, String>>>,
    next_id: Arc<AtomicU32>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time snapshot of all records, taken under the read
    /// lock. Iteration order over the map is unspecified.
    pub async fn list(&self) -> Vec<Record> {
        let records = self.records.read().await;
        records
            .iter()
            .map(|(key, value)| Record { key: *key, value: value.clone() })
            .collect()
    }

    /// Insert `value` under a freshly allocated key and return the
    /// created record. Keys start at 1 and strictly increase.
    pub async fn create(&self, value: String) -> Record {
        // Allocated outside the write lock; see the type-level note.
        let key = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        let mut records = self.records.write().await;
        records.insert(key, value.clone());

        Record { key, value }
    }

    /// Replace the value stored under `key`, leaving the key unchanged.
    pub async fn update(&self, key: u32, value: String) -> Result<Record, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(&key) {
            Some(stored) => {
                *stored = value.clone();
                Ok(Record { key, value })
            }
            None => Err(StoreError::NotFound(key)),
        }
    }

    /// Remove the record stored under `key`.
    pub async fn delete(&self, key: u32) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        match records.remove(&key) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(key)),
        }
    }
}
