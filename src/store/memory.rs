use super::{DiffRecord, DiffStore, StoreError};
use crate::id::DiffId;
use hashbrown::{hash_map::Entry, HashMap};
use std::sync::RwLock;
use tracing::debug;

/// A process-local store, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<DiffId, DiffRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl DiffStore for MemoryStore {
    fn put(&self, id: &DiffId, record: &DiffRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        match records.entry(*id) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists { id: *id }),
            Entry::Vacant(v) => {
                v.insert(record.clone());
                debug!(%id, "stored record in memory");
                Ok(())
            }
        }
    }

    fn get(&self, id: &DiffId) -> Result<Option<DiffRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(id).cloned())
    }
}
