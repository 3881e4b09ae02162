//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! merch checkout --name "Asha Rao" --email asha@example.com --address "Hostel 4"
//! ```

use chrono::Utc;
use merch_shop_store::{CartSummary, CheckoutForm, Pricing, Store};

use super::emit;
use crate::error::CliError;
use crate::render;

/// Place an order for the current cart.
///
/// # Errors
///
/// Returns [`CliError::Checkout`] if a field is blank, the email is invalid
/// or the cart is empty. Nothing is recorded in that case.
pub fn place(store: &Store, pricing: &Pricing, form: &CheckoutForm) -> Result<(), CliError> {
    let summary = CartSummary::compute(store.state().cart(), pricing);
    let order = store.place_order(form, Utc::now())?;

    tracing::info!(order_id = %order.id, items = order.item_count(), "Order placed");
    let mut lines = vec![format!("Order #{} placed. Thank you, {}!", order.id, order.name)];
    lines.extend(render::summary_lines(&summary));
    emit(&lines.join("\n"));
    Ok(())
}
