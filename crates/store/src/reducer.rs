//! The shop state transition function.
//!
//! [`transition`] is pure: no I/O, no clock, no randomness. It is total over
//! [`Action`] and never fails; requests that match nothing leave the state
//! untouched. Slices an action does not change keep their allocation, so a
//! no-op transition is observable as "nothing changed" by subscribers.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use merch_shop_core::{CartLine, Order, Product, ProductId};

use crate::action::{Action, PartialShopState};
use crate::state::ShopState;

/// Compute the state that follows `state` under `action`.
#[must_use]
pub fn transition(state: ShopState, action: Action) -> ShopState {
    match action {
        Action::AddToCart(addition) => {
            let quantity = addition.quantity_or_default();
            ShopState {
                cart: Arc::new(add_units(&state.cart, addition.product, quantity)),
                ..state
            }
        }
        Action::MoveToCart(product) => ShopState {
            wishlist: retain(&state.wishlist, |entry| entry.id != product.id),
            cart: Arc::new(add_units(&state.cart, product, 1)),
            ..state
        },
        Action::AddToWishlist(product) => {
            if state.in_wishlist(product.id) {
                return state;
            }
            let mut wishlist = state.wishlist.as_ref().clone();
            wishlist.push(product);
            ShopState {
                wishlist: Arc::new(wishlist),
                ..state
            }
        }
        Action::RemoveFromCart(id) => ShopState {
            cart: retain(&state.cart, |line| line.product.id != id),
            ..state
        },
        Action::UpdateCartQuantity { id, quantity } => {
            if quantity < 1 {
                return ShopState {
                    cart: retain(&state.cart, |line| line.product.id != id),
                    ..state
                };
            }
            let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            ShopState {
                cart: set_quantity(&state.cart, id, quantity),
                ..state
            }
        }
        Action::RemoveFromWishlist(id) => ShopState {
            wishlist: retain(&state.wishlist, |entry| entry.id != id),
            ..state
        },
        Action::AddOrder(order) => {
            let mut orders = state.orders.as_ref().clone();
            orders.push(order);
            ShopState {
                orders: Arc::new(orders),
                ..state
            }
        }
        Action::ClearCart => {
            if state.cart.is_empty() {
                return state;
            }
            ShopState {
                cart: Arc::new(Vec::new()),
                ..state
            }
        }
        Action::RemoveOrder(id) => ShopState {
            orders: retain(&state.orders, |order| order.id != id),
            ..state
        },
        Action::SetInitialState(partial) => hydrate(state, partial),
    }
}

/// Overwrite each provided slice, normalizing it against the state invariants.
fn hydrate(state: ShopState, partial: PartialShopState) -> ShopState {
    let PartialShopState {
        cart,
        wishlist,
        orders,
    } = partial;

    ShopState {
        cart: cart.map_or(state.cart, |lines| {
            Arc::new(unique_by(
                lines.into_iter().filter(|line| line.quantity >= 1),
                |line: &CartLine| line.product.id,
            ))
        }),
        wishlist: wishlist.map_or(state.wishlist, |entries| {
            Arc::new(unique_by(entries, |entry: &Product| entry.id))
        }),
        orders: orders.map_or(state.orders, |orders| {
            Arc::new(unique_by(orders, |order: &Order| order.id))
        }),
    }
}

/// Increment the product's line by `quantity`, or append a new line.
///
/// An existing line keeps its stored product fields.
fn add_units(cart: &[CartLine], product: Product, quantity: u32) -> Vec<CartLine> {
    let mut next = cart.to_vec();
    match next.iter_mut().find(|line| line.product.id == product.id) {
        Some(line) => line.quantity = line.quantity.saturating_add(quantity),
        None => next.push(CartLine::new(product, quantity)),
    }
    next
}

fn set_quantity(cart: &Arc<Vec<CartLine>>, id: ProductId, quantity: u32) -> Arc<Vec<CartLine>> {
    let needs_update = cart
        .iter()
        .any(|line| line.product.id == id && line.quantity != quantity);
    if !needs_update {
        return Arc::clone(cart);
    }
    Arc::new(
        cart.iter()
            .map(|line| {
                if line.product.id == id {
                    CartLine::new(line.product.clone(), quantity)
                } else {
                    line.clone()
                }
            })
            .collect(),
    )
}

/// Keep the items matching `keep`, reusing the allocation if nothing is dropped.
fn retain<T: Clone>(items: &Arc<Vec<T>>, keep: impl Fn(&T) -> bool) -> Arc<Vec<T>> {
    if items.iter().all(&keep) {
        return Arc::clone(items);
    }
    Arc::new(items.iter().filter(|item| keep(*item)).cloned().collect())
}

/// First occurrence wins.
fn unique_by<T, K: Eq + Hash>(items: impl IntoIterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}
