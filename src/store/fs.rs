use super::{DiffRecord, DiffStore, StoreError};
use crate::id::DiffId;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::debug;

/// Stores each record as `<id>.json` inside a directory.
///
/// Records are written to a temporary file in the same directory first and then moved into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &DiffId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl DiffStore for FileStore {
    fn put(&self, id: &DiffId, record: &DiffRecord) -> Result<(), StoreError> {
        let path = self.record_path(id);
        let bytes = serde_json::to_vec(record)?;

        // `get` sees the whole record or none
        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(&bytes)?;
        file.as_file().sync_all()?;

        file.persist_noclobber(&path).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                StoreError::AlreadyExists { id: *id }
            } else {
                StoreError::Io(e.error)
            }
        })?;

        debug!(%id, path = %path.display(), "stored record on disk");
        Ok(())
    }

    fn get(&self, id: &DiffId) -> Result<Option<DiffRecord>, StoreError> {
        let bytes = match fs::read(self.record_path(id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}
