//! Key-value storage backends for persisted shop state.
//!
//! The persistence bridge only needs string values under string keys, the
//! same contract a mobile key-value store offers. Backends:
//!
//! - [`MemoryStorage`] - shared in-process map (tests, ephemeral sessions)
//! - [`FileStorage`] - one JSON file per key under a data directory

mod file;
mod memory;

use std::future::Future;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem I/O failed for a key.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous string key-value store.
///
/// Operations on different keys are independent: a failure for one key says
/// nothing about the others.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}
