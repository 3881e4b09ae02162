//! Actions accepted by the shop state reducer.
//!
//! Actions use adjacently tagged serialization, so a dispatched action reads
//! like `{"type": "ADD_TO_CART", "payload": {"id": 1, ..., "quantity": 2}}`.

use merch_shop_core::{CartLine, Order, OrderId, Product, ProductId};
use serde::{Deserialize, Serialize};

/// Payload of [`Action::AddToCart`]: the product fields plus an optional quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAddition {
    /// Product to add.
    #[serde(flatten)]
    pub product: Product,
    /// Units to add; absent or below 1 means 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl CartAddition {
    /// The quantity to add, defaulting to 1.
    #[must_use]
    pub fn quantity_or_default(&self) -> u32 {
        self.quantity.filter(|quantity| *quantity >= 1).unwrap_or(1)
    }
}

/// Slices to overwrite during hydration. Absent slices are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialShopState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<Vec<CartLine>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wishlist: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<Order>>,
}

impl PartialShopState {
    /// A partial state that provides all three slices.
    #[must_use]
    pub const fn full(cart: Vec<CartLine>, wishlist: Vec<Product>, orders: Vec<Order>) -> Self {
        Self {
            cart: Some(cart),
            wishlist: Some(wishlist),
            orders: Some(orders),
        }
    }
}

/// A shop state transition request.
///
/// The set is closed; the reducer matches it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Increment the product's cart line, or append a new one.
    AddToCart(CartAddition),
    /// Remove the product from the wishlist and add one unit to the cart.
    MoveToCart(Product),
    /// Append to the wishlist unless already present.
    AddToWishlist(Product),
    /// Remove the product's cart line.
    RemoveFromCart(ProductId),
    /// Set a line's quantity; below 1 removes the line.
    UpdateCartQuantity { id: ProductId, quantity: i64 },
    /// Remove the product from the wishlist.
    RemoveFromWishlist(ProductId),
    /// Append a fully formed order to the history.
    AddOrder(Order),
    /// Empty the cart.
    ClearCart,
    /// Remove an order from the history.
    RemoveOrder(OrderId),
    /// Replace the provided slices wholesale (hydration).
    SetInitialState(PartialShopState),
}

impl Action {
    /// Shorthand for [`Action::AddToCart`] with an explicit quantity.
    #[must_use]
    pub const fn add_to_cart(product: Product, quantity: u32) -> Self {
        Self::AddToCart(CartAddition {
            product,
            quantity: Some(quantity),
        })
    }

    /// Parse an action from its JSON form.
    ///
    /// Returns `None` for unknown action types and malformed payloads; callers
    /// treat those as no-ops.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// The wire tag of this action, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddToCart(_) => "ADD_TO_CART",
            Self::MoveToCart(_) => "MOVE_TO_CART",
            Self::AddToWishlist(_) => "ADD_TO_WISHLIST",
            Self::RemoveFromCart(_) => "REMOVE_FROM_CART",
            Self::UpdateCartQuantity { .. } => "UPDATE_CART_QUANTITY",
            Self::RemoveFromWishlist(_) => "REMOVE_FROM_WISHLIST",
            Self::AddOrder(_) => "ADD_ORDER",
            Self::ClearCart => "CLEAR_CART",
            Self::RemoveOrder(_) => "REMOVE_ORDER",
            Self::SetInitialState(_) => "SET_INITIAL_STATE",
        }
    }
}
