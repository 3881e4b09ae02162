//! Placed order record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::cart::CartLine;
use crate::types::email::Email;
use crate::types::id::OrderId;
use crate::types::price::Price;

/// An order placed from the cart.
///
/// Orders are immutable once created; the only later change is deletion.
/// `items` is a snapshot of the cart at checkout time, not a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Creation timestamp in milliseconds, unique across the order history.
    pub id: OrderId,
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: Email,
    /// Delivery address.
    pub address: String,
    /// Cart lines at checkout.
    pub items: Vec<CartLine>,
    /// Sum of line totals.
    pub total: Price,
    /// Creation time (RFC 3339 on the wire).
    pub date: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }
}
