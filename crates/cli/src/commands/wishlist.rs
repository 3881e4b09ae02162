//! Wishlist commands.

use merch_shop_core::ProductId;
use merch_shop_store::{Action, Catalog, Store};

use super::{emit, lookup};
use crate::error::CliError;
use crate::render;

/// Show the wishlist.
pub fn show(store: &Store) {
    emit(&render::wishlist(&store.state()));
}

/// Save a catalog product to the wishlist.
///
/// # Errors
///
/// Returns [`CliError::ProductNotFound`] for an unknown id.
pub fn add(catalog: &Catalog, store: &Store, id: ProductId) -> Result<(), CliError> {
    let product = lookup(catalog, id)?.clone();
    let name = product.name.clone();
    store.dispatch(Action::AddToWishlist(product));
    emit(&format!("{name} is in your wishlist."));
    Ok(())
}

/// Drop a product from the wishlist.
pub fn remove(store: &Store, id: ProductId) {
    if !store.state().in_wishlist(id) {
        emit(&format!("Product {id} is not in your wishlist."));
        return;
    }
    store.dispatch(Action::RemoveFromWishlist(id));
    emit(&format!("Removed product {id} from your wishlist."));
}

/// Move a wishlisted product into the cart.
pub fn move_to_cart(store: &Store, id: ProductId) {
    let state = store.state();
    let Some(product) = state.wishlist().iter().find(|p| p.id == id) else {
        emit(&format!("Product {id} is not in your wishlist."));
        return;
    };
    let name = product.name.clone();
    store.dispatch(Action::MoveToCart(product.clone()));
    emit(&format!("Moved {name} to your cart."));
}
