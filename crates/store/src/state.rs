//! Shop state snapshot and its slices.

use core::fmt;
use std::sync::Arc;

use merch_shop_core::{CartLine, Order, OrderId, Product, ProductId};

/// One of the independently persisted collections in [`ShopState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Cart,
    Wishlist,
    Orders,
}

impl Slice {
    /// Every slice, in persistence order.
    pub const ALL: [Self; 3] = [Self::Cart, Self::Wishlist, Self::Orders];

    /// Stable lowercase name, also the default storage key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
            Self::Orders => "orders",
        }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Full in-memory snapshot of the cart, wishlist and order history.
///
/// Each slice sits behind an `Arc`. Transitions that leave a slice untouched
/// keep the same allocation, so "did this slice change" is a pointer
/// comparison and cloning a snapshot is cheap.
///
/// Invariants held by every state the reducer produces:
/// - at most one cart line per product id, each with quantity >= 1
/// - at most one wishlist entry per product id
/// - at most one order per order id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopState {
    pub(crate) cart: Arc<Vec<CartLine>>,
    pub(crate) wishlist: Arc<Vec<Product>>,
    pub(crate) orders: Arc<Vec<Order>>,
}

impl ShopState {
    /// Build a state from plain collections.
    ///
    /// The collections are taken as-is; use a hydrate action to have them
    /// normalized against the state invariants.
    #[must_use]
    pub fn from_parts(cart: Vec<CartLine>, wishlist: Vec<Product>, orders: Vec<Order>) -> Self {
        Self {
            cart: Arc::new(cart),
            wishlist: Arc::new(wishlist),
            orders: Arc::new(orders),
        }
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Wishlist entries in insertion order.
    #[must_use]
    pub fn wishlist(&self) -> &[Product] {
        &self.wishlist
    }

    /// Orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders, newest first (display order).
    pub fn orders_newest_first(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().rev()
    }

    /// The cart line for a product, if any.
    #[must_use]
    pub fn cart_line(&self, id: ProductId) -> Option<&CartLine> {
        self.cart.iter().find(|line| line.product.id == id)
    }

    /// Whether a product is on the wishlist.
    #[must_use]
    pub fn in_wishlist(&self, id: ProductId) -> bool {
        self.wishlist.iter().any(|product| product.id == id)
    }

    /// The order with the given id, if any.
    #[must_use]
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        self.cart
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Whether the slice holds the same allocation in both states.
    #[must_use]
    pub fn same_slice(&self, other: &Self, slice: Slice) -> bool {
        match slice {
            Slice::Cart => Arc::ptr_eq(&self.cart, &other.cart),
            Slice::Wishlist => Arc::ptr_eq(&self.wishlist, &other.wishlist),
            Slice::Orders => Arc::ptr_eq(&self.orders, &other.orders),
        }
    }

    /// Slices whose allocation differs between `previous` and `self`.
    pub fn changed_since<'a>(&'a self, previous: &'a Self) -> impl Iterator<Item = Slice> + 'a {
        Slice::ALL
            .into_iter()
            .filter(move |slice| !self.same_slice(previous, *slice))
    }
}
