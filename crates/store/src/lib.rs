//! Merch Shop Store - client-side shop state and its persistence.
//!
//! # Architecture
//!
//! - [`reducer::transition`] is the single pure state transition: it maps a
//!   [`ShopState`] and an [`Action`] to the next state and never fails
//! - [`Store`] is the cloneable handle consumers are given; it serializes
//!   transitions and notifies subscribers when a slice changes
//! - [`Persistence`] hydrates the store once from a [`KeyValueStore`] and then
//!   mirrors each changed slice back to storage in a background task
//! - [`Catalog`] is the compiled-in, read-only product table
//! - [`checkout`] turns the cart plus a customer form into an [`Order`]
//!
//! # Example
//!
//! ```rust,no_run
//! use merch_shop_store::{Action, Catalog, MemoryStorage, Persistence, Store};
//! use merch_shop_core::ProductId;
//!
//! # async fn demo() {
//! let store = Store::new();
//! let task = Persistence::new(MemoryStorage::new()).attach(&store).await;
//!
//! if let Some(product) = Catalog::builtin().get(ProductId::new(1)) {
//!     store.dispatch(Action::add_to_cart(product.clone(), 1));
//! }
//!
//! drop(store);
//! task.finish().await;
//! # }
//! ```
//!
//! [`Order`]: merch_shop_core::Order

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod catalog;
pub mod checkout;
pub mod persistence;
pub mod reducer;
pub mod state;
pub mod storage;
mod store;

pub use action::{Action, CartAddition, PartialShopState};
pub use catalog::{Catalog, CatalogError};
pub use checkout::{CartSummary, CheckoutError, CheckoutForm, Pricing};
pub use persistence::{PersistError, Persistence, PersistenceTask, SliceKeys};
pub use state::{ShopState, Slice};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
pub use store::Store;
