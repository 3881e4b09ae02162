//! Command implementations.
//!
//! Commands read snapshots from the [`Store`](merch_shop_store::Store) and
//! change it only through actions.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod wishlist;

use merch_shop_core::{Product, ProductId};
use merch_shop_store::Catalog;

use crate::error::CliError;

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(text: &str) {
    println!("{text}");
}

/// Look up a catalog product.
///
/// # Errors
///
/// Returns [`CliError::ProductNotFound`] for an unknown id.
pub fn lookup(catalog: &Catalog, id: ProductId) -> Result<&Product, CliError> {
    catalog.get(id).ok_or(CliError::ProductNotFound(id))
}
