//! Cart line record.

use core::ops::Deref;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::product::Product;

/// A product in the cart together with its quantity.
///
/// Serialized flat: the product fields plus a `quantity` field. The shop
/// state never holds a line whose quantity is below 1; the reducer removes
/// such lines instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line is for.
    #[serde(flatten)]
    pub product: Product,
    /// Number of units, at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Price of the whole line (unit price times quantity), saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }

    /// Price of the whole line, or `None` if it overflows.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.product.price.checked_times(self.quantity)
    }
}

impl Deref for CartLine {
    type Target = Product;

    fn deref(&self) -> &Self::Target {
        &self.product
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::types::{ImageRef, Price, ProductId};

    fn hoodie() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Nirman Hoodie".to_owned(),
            price: Price::whole(599),
            images: vec![ImageRef::new("assets/images/1.1.jpg")],
            tags: BTreeSet::from(["hoodie".to_owned()]),
        }
    }

    #[test]
    fn test_serializes_flat() {
        let line = CartLine::new(hoodie(), 2);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Nirman Hoodie");
        assert_eq!(json["quantity"], 2);
        assert!(json.get("product").is_none());
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::new(hoodie(), 3);
        assert_eq!(line.line_total(), Decimal::from(1797));
        assert_eq!(line.name, "Nirman Hoodie");
    }
}
