//! Persistence bridge between the [`Store`] and a [`KeyValueStore`].
//!
//! # Lifecycle
//!
//! 1. [`Persistence::attach`] reads the cart, wishlist and orders keys. Each
//!    read is independent; a missing key, a storage error or malformed JSON
//!    all yield an empty slice (errors are logged).
//! 2. The loaded slices are applied to the store as one hydrate transition.
//! 3. A background task then watches the store and writes every slice whose
//!    allocation changed since the last write, each to its own key.
//!
//! Nothing is written before hydration finishes, so an empty pre-hydration
//! state can never overwrite stored data. After hydration every change is
//! written, including a change to an empty slice: clearing the cart persists
//! `[]`.
//!
//! Write failures are logged and dropped. The in-memory store stays the
//! source of truth for the session and is never rolled back.

use merch_shop_core::{CartLine, Order, Product};
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::action::PartialShopState;
use crate::state::{ShopState, Slice};
use crate::storage::{KeyValueStore, StorageError};
use crate::store::Store;

/// Errors reading or writing one slice.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The storage backend failed.
    #[error("storage error for {slice}: {source}")]
    Storage {
        slice: Slice,
        #[source]
        source: StorageError,
    },

    /// The stored value is not valid JSON for the slice.
    #[error("malformed {slice} data: {source}")]
    Malformed {
        slice: Slice,
        #[source]
        source: serde_json::Error,
    },

    /// The slice could not be encoded.
    #[error("failed to encode {slice}: {source}")]
    Encode {
        slice: Slice,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage keys for the three slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceKeys {
    cart: String,
    wishlist: String,
    orders: String,
}

impl Default for SliceKeys {
    fn default() -> Self {
        Self {
            cart: Slice::Cart.name().to_owned(),
            wishlist: Slice::Wishlist.name().to_owned(),
            orders: Slice::Orders.name().to_owned(),
        }
    }
}

impl SliceKeys {
    /// Keys namespaced as `<prefix>.cart`, `<prefix>.wishlist`, `<prefix>.orders`.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        let key = |slice: Slice| format!("{prefix}.{}", slice.name());
        Self {
            cart: key(Slice::Cart),
            wishlist: key(Slice::Wishlist),
            orders: key(Slice::Orders),
        }
    }

    /// The key for a slice.
    #[must_use]
    pub fn key(&self, slice: Slice) -> &str {
        match slice {
            Slice::Cart => &self.cart,
            Slice::Wishlist => &self.wishlist,
            Slice::Orders => &self.orders,
        }
    }
}

/// Bridges a [`Store`] to durable storage.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    storage: S,
    keys: SliceKeys,
}

impl<S> Persistence<S>
where
    S: KeyValueStore + 'static,
{
    /// Create a bridge using the default slice keys.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            keys: SliceKeys::default(),
        }
    }

    /// Use different slice keys.
    #[must_use]
    pub fn with_keys(mut self, keys: SliceKeys) -> Self {
        self.keys = keys;
        self
    }

    /// The slice keys in use.
    #[must_use]
    pub const fn keys(&self) -> &SliceKeys {
        &self.keys
    }

    /// Hydrate `store` from storage and start mirroring its changes.
    ///
    /// Returns once hydration has been applied; writes happen on the returned
    /// background task.
    pub async fn attach(self, store: &Store) -> PersistenceTask {
        let loaded = self.load().await;

        // Subscribe before hydrating so nothing dispatched in between is missed.
        let changes = store.subscribe();
        let baseline = store.hydrate(loaded);

        info!(
            cart = baseline.cart().len(),
            wishlist = baseline.wishlist().len(),
            orders = baseline.orders().len(),
            "Shop state hydrated"
        );

        PersistenceTask {
            handle: tokio::spawn(self.run(changes, baseline)),
        }
    }

    /// Read all three slices, treating any failure as "no prior data".
    #[instrument(skip(self))]
    pub async fn load(&self) -> PartialShopState {
        PartialShopState::full(
            self.load_or_empty::<CartLine>(Slice::Cart).await,
            self.load_or_empty::<Product>(Slice::Wishlist).await,
            self.load_or_empty::<Order>(Slice::Orders).await,
        )
    }

    async fn load_or_empty<T: DeserializeOwned>(&self, slice: Slice) -> Vec<T> {
        match self.read_slice(slice).await {
            Ok(Some(items)) => items,
            Ok(None) => {
                debug!(%slice, "Nothing stored, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(%slice, key = self.keys.key(slice), error = %e, "Failed to load slice, starting empty");
                Vec::new()
            }
        }
    }

    /// Read and decode one slice.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if the backend fails and
    /// [`PersistError::Malformed`] if the stored JSON does not decode.
    pub async fn read_slice<T: DeserializeOwned>(
        &self,
        slice: Slice,
    ) -> Result<Option<Vec<T>>, PersistError> {
        let raw = self
            .storage
            .get(self.keys.key(slice))
            .await
            .map_err(|source| PersistError::Storage { slice, source })?;

        raw.map(|raw| {
            serde_json::from_str(&raw).map_err(|source| PersistError::Malformed { slice, source })
        })
        .transpose()
    }

    /// Encode and write one slice of `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Encode`] or [`PersistError::Storage`].
    #[instrument(skip(self, state))]
    pub async fn save_slice(&self, slice: Slice, state: &ShopState) -> Result<(), PersistError> {
        let encoded = match slice {
            Slice::Cart => serde_json::to_string(state.cart()),
            Slice::Wishlist => serde_json::to_string(state.wishlist()),
            Slice::Orders => serde_json::to_string(state.orders()),
        }
        .map_err(|source| PersistError::Encode { slice, source })?;

        self.storage
            .set(self.keys.key(slice), &encoded)
            .await
            .map_err(|source| PersistError::Storage { slice, source })
    }

    async fn run(self, mut changes: watch::Receiver<ShopState>, mut last: ShopState) {
        while changes.changed().await.is_ok() {
            let snapshot = changes.borrow_and_update().clone();
            let dirty: Vec<Slice> = snapshot.changed_since(&last).collect();

            for slice in dirty {
                match self.save_slice(slice, &snapshot).await {
                    Ok(()) => debug!(%slice, "Slice saved"),
                    Err(e) => warn!(%slice, error = %e, "Failed to save slice"),
                }
            }
            last = snapshot;
        }
        debug!("Store closed, persistence stopped");
    }
}

/// Handle to the background save loop started by [`Persistence::attach`].
#[derive(Debug)]
pub struct PersistenceTask {
    handle: JoinHandle<()>,
}

impl PersistenceTask {
    /// Wait for the save loop to write the final state and exit.
    ///
    /// The loop ends once every [`Store`] handle has been dropped, so drop
    /// them before awaiting this.
    pub async fn finish(self) {
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Persistence task ended abnormally");
        }
    }
}
