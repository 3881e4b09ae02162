//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! merch products
//! merch product 5
//! ```

use merch_shop_core::ProductId;
use merch_shop_store::{Catalog, Store};

use super::{emit, lookup};
use crate::error::CliError;
use crate::render;

/// List every product.
pub fn list(catalog: &Catalog, store: &Store) {
    emit(&render::catalog(catalog, &store.state()));
}

/// Show one product.
///
/// # Errors
///
/// Returns [`CliError::ProductNotFound`] for an unknown id.
pub fn show(catalog: &Catalog, store: &Store, id: ProductId) -> Result<(), CliError> {
    let product = lookup(catalog, id)?;
    emit(&render::product(product, &store.state()));
    Ok(())
}
