//! The shop state store handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use merch_shop_core::Order;
use tokio::sync::watch;
use tracing::debug;

use crate::action::{Action, PartialShopState};
use crate::checkout::{self, CheckoutError, CheckoutForm};
use crate::reducer::transition;
use crate::state::ShopState;

/// Handle to the shop state.
///
/// This struct is cheaply cloneable via `Arc`; pass it explicitly to whatever
/// needs to read or change the state. Every change goes through
/// [`dispatch`](Self::dispatch), which runs the reducer under the channel's
/// write lock, so transitions never interleave.
///
/// Subscribers are woken only when a transition actually changed a slice.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: watch::Sender<ShopState>,
    hydrated: AtomicBool,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.state.borrow())
            .field("hydrated", &self.is_hydrated())
            .finish()
    }
}

impl Store {
    /// Create a store holding the empty pre-hydration state.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(ShopState::default());
        Self {
            inner: Arc::new(StoreInner {
                state,
                hydrated: AtomicBool::new(false),
            }),
        }
    }

    /// A read-only snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ShopState {
        self.inner.state.borrow().clone()
    }

    /// Apply an action.
    pub fn dispatch(&self, action: Action) {
        let name = action.name();
        let changed = self.inner.state.send_if_modified(|state| {
            let previous = state.clone();
            *state = transition(std::mem::take(state), action);
            state.changed_since(&previous).next().is_some()
        });
        debug!(action = name, changed, "Dispatched");
    }

    /// Apply an action given in its JSON form.
    ///
    /// Unknown action types and malformed payloads are ignored.
    pub fn dispatch_json(&self, raw: &str) {
        match Action::from_json(raw) {
            Some(action) => self.dispatch(action),
            None => debug!(raw, "Ignoring unrecognized action"),
        }
    }

    /// Watch the state. The receiver starts with the current state marked seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ShopState> {
        self.inner.state.subscribe()
    }

    /// Whether hydration from storage has been applied.
    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.inner.hydrated.load(Ordering::Acquire)
    }

    /// Apply the one-time hydrate transition and return the resulting state.
    pub fn hydrate(&self, loaded: PartialShopState) -> ShopState {
        let mut hydrated = ShopState::default();
        self.inner.state.send_modify(|state| {
            *state = transition(
                std::mem::take(state),
                Action::SetInitialState(loaded),
            );
            hydrated = state.clone();
        });
        if self.inner.hydrated.swap(true, Ordering::AcqRel) {
            debug!("Store hydrated more than once");
        }
        hydrated
    }

    /// Validate the form, record the order and empty the cart in one transition.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] if the form is invalid or the cart is empty;
    /// the state is left untouched.
    pub fn place_order(
        &self,
        form: &CheckoutForm,
        now: DateTime<Utc>,
    ) -> Result<Order, CheckoutError> {
        let mut outcome = Err(CheckoutError::EmptyCart);
        self.inner.state.send_if_modified(|state| {
            outcome = checkout::build_order(state.cart(), state.orders(), form, now);
            let Ok(order) = &outcome else {
                return false;
            };
            let next = transition(std::mem::take(state), Action::AddOrder(order.clone()));
            *state = transition(next, Action::ClearCart);
            true
        });
        if let Ok(order) = &outcome {
            debug!(order_id = %order.id, items = order.items.len(), "Order placed");
        }
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use merch_shop_core::{CartLine, OrderId, ProductId};

    use super::*;
    use crate::catalog::Catalog;

    fn product(id: i32) -> merch_shop_core::Product {
        Catalog::builtin().get(ProductId::new(id)).unwrap().clone()
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Asha".to_owned(),
            email: "asha@example.com".to_owned(),
            address: "Hostel 4".to_owned(),
        }
    }

    #[test]
    fn test_dispatch_updates_snapshot() {
        let store = Store::new();
        store.dispatch(Action::add_to_cart(product(1), 1));
        store.dispatch(Action::add_to_cart(product(1), 1));
        assert_eq!(store.state().cart_line(ProductId::new(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_noop_does_not_notify() {
        let store = Store::new();
        let mut rx = store.subscribe();
        store.dispatch(Action::RemoveFromCart(ProductId::new(1)));
        assert!(!rx.has_changed().unwrap());

        store.dispatch(Action::AddToWishlist(product(2)));
        assert!(rx.has_changed().unwrap());
        rx.mark_unchanged();

        store.dispatch(Action::AddToWishlist(product(2)));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_dispatch_json() {
        let store = Store::new();
        store.dispatch_json(r#"{"type": "APPLY_COUPON", "payload": "FREE"}"#);
        assert_eq!(store.state(), ShopState::default());

        let raw = serde_json::to_string(&Action::AddToWishlist(product(9))).unwrap();
        store.dispatch_json(&raw);
        assert!(store.state().in_wishlist(ProductId::new(9)));
    }

    #[test]
    fn test_hydrate_marks_store() {
        let store = Store::new();
        assert!(!store.is_hydrated());
        let state = store.hydrate(PartialShopState::full(
            vec![CartLine::new(product(3), 2)],
            Vec::new(),
            Vec::new(),
        ));
        assert!(store.is_hydrated());
        assert_eq!(state, store.state());
        assert_eq!(state.cart_item_count(), 2);
    }

    #[test]
    fn test_place_order_records_and_clears() {
        let store = Store::new();
        store.dispatch(Action::add_to_cart(product(5), 2));
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

        let order = store.place_order(&form(), now).unwrap();

        let state = store.state();
        assert!(state.cart().is_empty());
        assert_eq!(state.orders(), &[order.clone()]);
        assert_eq!(order.id, OrderId::new(1_700_000_000_000));
        assert_eq!(order.items[0].quantity, 2);
    }

    #[test]
    fn test_place_order_with_overflowing_cart() {
        let store = Store::new();
        store.dispatch_json(
            &serde_json::json!({
                "type": "ADD_TO_CART",
                "payload": {
                    "id": 1,
                    "name": "Nirman Hoodie",
                    "price": 1e25,
                    "images": ["assets/images/1.1.jpg"],
                    "quantity": 100_000
                }
            })
            .to_string(),
        );
        assert_eq!(store.state().cart().len(), 1);
        let before = store.state();

        assert_eq!(
            store.place_order(&form(), Utc::now()),
            Err(CheckoutError::TotalOverflow)
        );
        assert_eq!(store.state().changed_since(&before).count(), 0);
        assert!(store.state().orders().is_empty());
    }

    #[test]
    fn test_place_order_failure_leaves_state() {
        let store = Store::new();
        store.dispatch(Action::add_to_cart(product(5), 1));
        let before = store.state();

        let mut bad = form();
        bad.email = "nope".to_owned();
        assert!(store.place_order(&bad, Utc::now()).is_err());
        assert_eq!(store.state().changed_since(&before).count(), 0);

        let empty = Store::new();
        assert_eq!(
            empty.place_order(&form(), Utc::now()),
            Err(CheckoutError::EmptyCart)
        );
    }
}
