//! CLI error type.

use merch_shop_core::{OrderId, ProductId};
use merch_shop_store::CheckoutError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors a command can end with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),
}
