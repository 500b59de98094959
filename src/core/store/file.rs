//! File-backed store
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes go to a temporary file
//! first and are renamed into place, so a crash mid-write leaves either the
//! previous snapshot or the new one, never a partial file.

use super::{KeyValueStore, StoreError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Store that keeps one JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `data_dir`. The directory is created on first write.
    #[must_use]
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the store files
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing `key`
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json.tmp"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let wrap = |source: std::io::Error| StoreError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.data_dir).await.map_err(wrap)?;

        let tmp_path = self.tmp_path_for(key);
        fs::write(&tmp_path, value).await.map_err(wrap)?;
        fs::rename(&tmp_path, self.path_for(key))
            .await
            .map_err(wrap)?;
        Ok(())
    }
}
