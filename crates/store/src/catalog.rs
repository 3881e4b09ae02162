//! Static product catalog.
//!
//! The catalog is compiled in and never changes at runtime. It is the only
//! source of [`Product`] records: the cart, wishlist and orders all hold
//! copies taken from here.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use merch_shop_core::{ImageRef, Price, Product, ProductId};
use thiserror::Error;

/// Errors that can occur when building a [`Catalog`] from a product list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product id {0} must be positive")]
    InvalidId(ProductId),
    #[error("product {id} has {count} images (expected 1 to {max})", max = Product::MAX_IMAGES)]
    ImageCount { id: ProductId, count: usize },
}

/// Built-in catalog rows: id, name, price in rupees, tags.
const BUILTIN_ROWS: &[(i32, &str, u32, &[&str])] = &[
    (1, "Nirman Hoodie", 599, &["nirmaan", "hoodie"]),
    (2, "Postman Hoodie", 699, &["postman", "hoodie"]),
    (3, "NSS Hoodie", 599, &["nss", "hoodie"]),
    (4, "CRAC Hoodie", 699, &["crac", "hoodie"]),
    (5, "DVM Hoodie", 799, &["dvm", "hoodie"]),
    (6, "DVM Tshirt", 259, &["dvm", "Tshirt"]),
    (7, "CodingClub Tshirt", 299, &["codingclub", "tshirt"]),
    (8, "SUTT Tshirt", 399, &["sutt", "tshirt"]),
    (9, "Girls Oversized Tshirt (DVM)", 299, &["dvm", "tshirt"]),
    (10, "Girls Tshirt (Pack of 2) (SUTT)", 499, &["sutt", "gadget"]),
    (11, "DVM Bottle", 259, &["dvm", "bottle"]),
    (12, "Postmat Bottle", 799, &["postman", "bottle"]),
    (13, "Coding Club Cap", 149, &["coding club", "cap"]),
    (14, "DVM Cap", 249, &["dvm", "cap"]),
    (15, "Photography Club Keychain", 99, &["photog", "keychain"]),
    (16, "Coding Club Keychain", 69, &["coding club", "keychain"]),
];

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    products: BUILTIN_ROWS
        .iter()
        .map(|&(id, name, price, tags)| Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::whole(price),
            images: (1..=Product::MAX_IMAGES)
                .map(|n| ImageRef::new(format!("assets/images/{id}.{n}.jpg")))
                .collect(),
            tags: tags.iter().map(|&tag| tag.to_owned()).collect::<BTreeSet<_>>(),
        })
        .collect(),
});

/// An ordered, read-only list of products with lookup by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The catalog shipped with the shop.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a catalog from a product list, keeping its order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if an id is repeated or not positive, or a
    /// product does not carry between one and three images.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.id.get() < 1 {
                return Err(CatalogError::InvalidId(product.id));
            }
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            let count = product.images.len();
            if count == 0 || count > Product::MAX_IMAGES {
                return Err(CatalogError::ImageCount {
                    id: product.id,
                    count,
                });
            }
        }
        Ok(Self { products })
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
