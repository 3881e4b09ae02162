//! Integration tests for placing and managing orders.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use merch_shop_core::{OrderId, Price};
use merch_shop_integration_tests::{TestShop, close, product};
use merch_shop_store::{Action, CartSummary, CheckoutError, CheckoutForm, Pricing};

fn form() -> CheckoutForm {
    CheckoutForm {
        name: "Asha Rao".to_owned(),
        email: "asha@example.com".to_owned(),
        address: "Hostel 4, Pilani".to_owned(),
    }
}

#[tokio::test]
async fn test_order_survives_restart() {
    let shop = TestShop::new().unwrap();

    let (store, task) = shop.open().await;
    store.dispatch(Action::add_to_cart(product(2).unwrap(), 1));
    store.dispatch(Action::add_to_cart(product(16).unwrap(), 4));
    let now = Utc.timestamp_millis_opt(1_717_171_717_171).unwrap();
    let order = store.place_order(&form(), now).unwrap();
    close(store, task).await;

    assert_eq!(order.total, Price::whole(699 + 4 * 69));
    assert_eq!(order.item_count(), 5);

    let (store, task) = shop.open().await;
    let state = store.state();
    assert!(state.cart().is_empty());
    assert_eq!(state.orders(), &[order]);
    assert_eq!(shop.read_raw("cart").unwrap(), "[]");
    close(store, task).await;
}

#[tokio::test]
async fn test_orders_listed_newest_first_across_sessions() {
    let shop = TestShop::new().unwrap();

    for (session, millis) in [(1, 1_000_i64), (3, 2_000), (5, 3_000)] {
        let (store, task) = shop.open().await;
        store.dispatch(Action::add_to_cart(product(session).unwrap(), 1));
        store
            .place_order(&form(), Utc.timestamp_millis_opt(millis).unwrap())
            .unwrap();
        close(store, task).await;
    }

    let (store, task) = shop.open().await;
    let ids: Vec<i64> = store
        .state()
        .orders_newest_first()
        .map(|order| order.id.get())
        .collect();
    assert_eq!(ids, vec![3_000, 2_000, 1_000]);
    close(store, task).await;
}

#[tokio::test]
async fn test_failed_checkout_changes_nothing() {
    let shop = TestShop::new().unwrap();

    let (store, task) = shop.open().await;
    store.dispatch(Action::add_to_cart(product(11).unwrap(), 2));

    let mut bad = form();
    bad.email = "asha.example.com".to_owned();
    assert!(matches!(
        store.place_order(&bad, Utc::now()),
        Err(CheckoutError::InvalidEmail(_))
    ));
    close(store, task).await;

    let (store, task) = shop.open().await;
    assert_eq!(store.state().cart_item_count(), 2);
    assert!(store.state().orders().is_empty());
    assert!(!shop.file("orders").exists());
    close(store, task).await;
}

#[tokio::test]
async fn test_remove_order_is_persisted() {
    let shop = TestShop::new().unwrap();

    let (store, task) = shop.open().await;
    store.dispatch(Action::add_to_cart(product(13).unwrap(), 1));
    let kept = store
        .place_order(&form(), Utc.timestamp_millis_opt(10_000).unwrap())
        .unwrap();
    store.dispatch(Action::add_to_cart(product(14).unwrap(), 1));
    let removed = store
        .place_order(&form(), Utc.timestamp_millis_opt(20_000).unwrap())
        .unwrap();
    close(store, task).await;

    let (store, task) = shop.open().await;
    store.dispatch(Action::RemoveOrder(removed.id));
    // Removing an unknown order is a no-op.
    store.dispatch(Action::RemoveOrder(OrderId::new(42)));
    close(store, task).await;

    let (store, task) = shop.open().await;
    assert_eq!(store.state().orders(), &[kept]);
    close(store, task).await;
}

#[tokio::test]
async fn test_summary_matches_order_total() {
    let shop = TestShop::new().unwrap();

    let (store, task) = shop.open().await;
    store.dispatch(Action::add_to_cart(product(1).unwrap(), 2));
    store.dispatch(Action::add_to_cart(product(13).unwrap(), 1));

    let summary = CartSummary::compute(store.state().cart(), &Pricing::default());
    let order = store.place_order(&form(), Utc::now()).unwrap();

    // The recorded total is the subtotal; tax and shipping are display only.
    assert_eq!(order.total.amount(), summary.subtotal);
    assert_eq!(summary.total, summary.subtotal + summary.tax + summary.shipping);
    close(store, task).await;
}
