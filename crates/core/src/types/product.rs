//! Catalog product record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// Reference to a bundled product image (an asset path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Create an image reference from an asset path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the asset path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A purchasable product.
///
/// Products come from the static catalog and are never mutated. Cart lines,
/// wishlist entries and order snapshots embed a copy of the product fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// One to three image references, in display order.
    pub images: Vec<ImageRef>,
    /// Display tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Product {
    /// Maximum number of images a product carries.
    pub const MAX_IMAGES: usize = 3;

    /// The first image, used as the thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&ImageRef> {
        self.images.first()
    }
}
