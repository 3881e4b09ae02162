//! File-backed storage: one `<key>.json` file per key.

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Stores each key as a JSON file inside a data directory.
///
/// Writes go to a temporary sibling file first and are then renamed over the
/// target, so readers see either the old or the new value, never a partial
/// write. The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] unless the key is non-empty, made
    /// of ASCII letters, digits, `.`, `_` or `-`, and does not start with `.`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        key: key.to_owned(),
        source,
    }
}

impl KeyValueStore for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(io_error(key))?;
        tokio::fs::write(&tmp, value).await.map_err(io_error(key))?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_error(key))?;

        debug!(key, bytes = value.len(), path = %path.display(), "Wrote storage key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key)(e)),
        }
    }
}
