//! Core types for the merch shop.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! records stored in the cart, wishlist and order history.

pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;

pub use cart::CartLine;
pub use email::{Email, EmailError};
pub use id::*;
pub use order::Order;
pub use price::{Price, PriceError};
pub use product::{ImageRef, Product};
