//! Integration tests for the merch shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p merch-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shop_lifecycle` - state surviving restarts through file storage
//! - `checkout_flow` - placing, listing and removing orders end to end
//! - `storage_failures` - unreadable and unwritable slices
//!
//! Each test opens one or more [`Store`]s over a [`TestShop`], a throwaway
//! data directory, and closes them the way the CLI does: drop the store, then
//! wait for the save loop to finish.

use std::io;
use std::path::{Path, PathBuf};

use merch_shop_core::{Product, ProductId};
use merch_shop_store::{Catalog, FileStorage, Persistence, PersistenceTask, SliceKeys, Store};
use tempfile::TempDir;

/// A store session over a temporary data directory.
pub struct TestShop {
    dir: TempDir,
    keys: SliceKeys,
}

impl TestShop {
    /// Create an empty data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            keys: SliceKeys::default(),
        })
    }

    /// Use namespaced slice keys for every store opened afterwards.
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.keys = SliceKeys::with_prefix(prefix);
        self
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn file(&self, key: &str) -> PathBuf {
        self.dir.path().join(format!("{key}.json"))
    }

    /// Write raw contents for `key`, bypassing the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_raw(&self, key: &str, contents: &str) -> io::Result<()> {
        std::fs::write(self.file(key), contents)
    }

    /// Read the raw contents stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_raw(&self, key: &str) -> io::Result<String> {
        std::fs::read_to_string(self.file(key))
    }

    /// Open a hydrated store backed by this directory.
    pub async fn open(&self) -> (Store, PersistenceTask) {
        open_at(self.dir.path(), self.keys.clone()).await
    }
}

/// Open a hydrated store backed by `dir`.
pub async fn open_at(dir: &Path, keys: SliceKeys) -> (Store, PersistenceTask) {
    let store = Store::new();
    let task = Persistence::new(FileStorage::new(dir))
        .with_keys(keys)
        .attach(&store)
        .await;
    (store, task)
}

/// Drop the store and wait until its final state is written.
pub async fn close(store: Store, task: PersistenceTask) {
    drop(store);
    task.finish().await;
}

/// A product from the built-in catalog.
#[must_use]
pub fn product(id: i32) -> Option<Product> {
    Catalog::builtin().get(ProductId::new(id)).cloned()
}
