//! Persistence of submitted text pairs

mod fs;
mod memory;

pub use fs::FileStore;
pub use memory::MemoryStore;

use crate::{id::DiffId, lines::trim_blob};
use serde::{Deserialize, Serialize};
use std::{io, sync::Arc};
use thiserror::Error;

/// The stored pair of texts. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffRecord {
    old_text: String,
    new_text: String,
}

impl DiffRecord {
    /// Build a record, trimming leading and trailing whitespace and byte order marks of each whole
    /// text
    pub fn new(old_text: &str, new_text: &str) -> Self {
        Self {
            old_text: trim_blob(old_text).to_owned(),
            new_text: trim_blob(new_text).to_owned(),
        }
    }

    pub fn old_text(&self) -> &str {
        &self.old_text
    }

    pub fn new_text(&self) -> &str {
        &self.new_text
    }
}

/// Errors returned by a [`DiffStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("a record with id {id} already exists")]
    AlreadyExists { id: DiffId },

    #[error("store lock poisoned")]
    Poisoned,
}

/// A key-value store for [`DiffRecord`]s.
///
/// Individual `put` and `get` calls must be atomic. A record is written once and never replaced.
pub trait DiffStore: Send + Sync {
    /// Persist `record` under `id`, failing with [`StoreError::AlreadyExists`] if `id` is taken
    fn put(&self, id: &DiffId, record: &DiffRecord) -> Result<(), StoreError>;

    /// Look up the record stored under `id`
    fn get(&self, id: &DiffId) -> Result<Option<DiffRecord>, StoreError>;
}

impl<S: DiffStore + ?Sized> DiffStore for Box<S> {
    fn put(&self, id: &DiffId, record: &DiffRecord) -> Result<(), StoreError> {
        (**self).put(id, record)
    }

    fn get(&self, id: &DiffId) -> Result<Option<DiffRecord>, StoreError> {
        (**self).get(id)
    }
}

impl<S: DiffStore + ?Sized> DiffStore for Arc<S> {
    fn put(&self, id: &DiffId, record: &DiffRecord) -> Result<(), StoreError> {
        (**self).put(id, record)
    }

    fn get(&self, id: &DiffId) -> Result<Option<DiffRecord>, StoreError> {
        (**self).get(id)
    }
}
