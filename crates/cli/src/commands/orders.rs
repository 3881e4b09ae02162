//! Order history commands.

use merch_shop_core::OrderId;
use merch_shop_store::{Action, Store};

use super::emit;
use crate::error::CliError;
use crate::render;

/// List past orders, newest first.
pub fn list(store: &Store) {
    emit(&render::orders(&store.state()));
}

/// Show one order.
///
/// # Errors
///
/// Returns [`CliError::OrderNotFound`] if no order has this id.
pub fn show(store: &Store, id: OrderId) -> Result<(), CliError> {
    let state = store.state();
    let order = state.order(id).ok_or(CliError::OrderNotFound(id))?;
    emit(&render::order(order));
    Ok(())
}

/// Delete an order from the history.
pub fn remove(store: &Store, id: OrderId) {
    if store.state().order(id).is_none() {
        emit(&format!("No order #{id}."));
        return;
    }
    store.dispatch(Action::RemoveOrder(id));
    emit(&format!("Removed order #{id}."));
}
