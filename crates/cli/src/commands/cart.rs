//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! merch cart show
//! merch cart add 5 --quantity 2
//! merch cart set 5 3
//! merch cart remove 5
//! merch cart clear
//! ```

use merch_shop_core::ProductId;
use merch_shop_store::{Action, Catalog, Pricing, Store};

use super::{emit, lookup};
use crate::error::CliError;
use crate::render;

/// Show the cart and its totals.
pub fn show(store: &Store, pricing: &Pricing) {
    emit(&render::cart(&store.state(), pricing));
}

/// Add a catalog product to the cart.
///
/// # Errors
///
/// Returns [`CliError::ProductNotFound`] for an unknown id.
pub fn add(
    catalog: &Catalog,
    store: &Store,
    id: ProductId,
    quantity: Option<u32>,
) -> Result<(), CliError> {
    let product = lookup(catalog, id)?.clone();
    let name = product.name.clone();
    store.dispatch(Action::add_to_cart(product, quantity.unwrap_or(1)));

    let total = store.state().cart_line(id).map_or(0, |line| line.quantity);
    tracing::info!(product_id = %id, total, "Added to cart");
    emit(&format!("Added {name} to your cart ({total} in cart)."));
    Ok(())
}

/// Remove a line from the cart.
pub fn remove(store: &Store, id: ProductId) {
    if store.state().cart_line(id).is_none() {
        emit(&format!("Product {id} is not in your cart."));
        return;
    }
    store.dispatch(Action::RemoveFromCart(id));
    emit(&format!("Removed product {id} from your cart."));
}

/// Set a line's quantity from raw user input.
///
/// The input is clamped with [`clamp_quantity`] before it is dispatched.
pub fn set(store: &Store, id: ProductId, raw: &str) {
    if store.state().cart_line(id).is_none() {
        emit(&format!("Product {id} is not in your cart."));
        return;
    }
    let quantity = clamp_quantity(raw);
    store.dispatch(Action::UpdateCartQuantity { id, quantity });
    emit(&format!("Set product {id} to {quantity}."));
}

/// Empty the cart.
pub fn clear(store: &Store) {
    store.dispatch(Action::ClearCart);
    emit("Your cart is empty.");
}

/// Quantity typed into the cart: anything that is not a whole number of at
/// least one becomes one.
pub fn clamp_quantity(raw: &str) -> i64 {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|quantity| *quantity >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity("4"), 4);
        assert_eq!(clamp_quantity(" 12 "), 12);
        assert_eq!(clamp_quantity("0"), 1);
        assert_eq!(clamp_quantity("-3"), 1);
        assert_eq!(clamp_quantity("two"), 1);
        assert_eq!(clamp_quantity(""), 1);
    }

    #[test]
    fn test_add_then_set() {
        let store = Store::new();
        let id = ProductId::new(7);
        add(Catalog::builtin(), &store, id, None).unwrap();
        add(Catalog::builtin(), &store, id, Some(2)).unwrap();
        assert_eq!(store.state().cart_line(id).unwrap().quantity, 3);

        set(&store, id, "0");
        assert_eq!(store.state().cart_line(id).unwrap().quantity, 1);

        remove(&store, id);
        assert!(store.state().cart().is_empty());
    }

    #[test]
    fn test_add_unknown_product() {
        let store = Store::new();
        assert!(matches!(
            add(Catalog::builtin(), &store, ProductId::new(99), None),
            Err(CliError::ProductNotFound(id)) if id == ProductId::new(99)
        ));
        assert!(store.state().cart().is_empty());
    }
}
