//! Plain-text views of the catalog and the shop state.
//!
//! Every function here returns the text to show; the commands decide where
//! it goes.

use merch_shop_core::{CartLine, Order, Price, Product};
use merch_shop_store::{CartSummary, Catalog, Pricing, ShopState};
use rust_decimal::Decimal;

/// Format an amount the way prices are shown.
pub fn money(amount: Decimal) -> String {
    format!("{}{amount:.2}", Price::SYMBOL)
}

fn tags(product: &Product) -> String {
    product.tags.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Markers shown next to a product already in the cart or wishlist.
fn badges(product: &Product, state: &ShopState) -> String {
    let mut badges = Vec::new();
    if let Some(line) = state.cart_line(product.id) {
        badges.push(format!("in cart x{}", line.quantity));
    }
    if state.in_wishlist(product.id) {
        badges.push("wishlisted".to_owned());
    }
    if badges.is_empty() {
        String::new()
    } else {
        format!("  ({})", badges.join(", "))
    }
}

/// The product grid.
pub fn catalog(catalog: &Catalog, state: &ShopState) -> String {
    let mut lines = vec![format!("{} products", catalog.len())];
    lines.extend(catalog.products().iter().map(|product| {
        format!(
            "{:>3}  {:<34} {:>10}{}",
            product.id.get(),
            product.name,
            product.price.to_string(),
            badges(product, state)
        )
    }));
    lines.join("\n")
}

/// A single product page.
pub fn product(product: &Product, state: &ShopState) -> String {
    let mut lines = vec![
        format!("{}{}", product.name, badges(product, state)),
        format!("Price:  {}", product.price),
        format!("Tags:   {}", tags(product)),
    ];
    lines.extend(
        product
            .images
            .iter()
            .map(|image| format!("Image:  {}", image.as_str())),
    );
    lines.join("\n")
}

fn cart_line(line: &CartLine) -> String {
    format!(
        "{:>3}  {:<34} {:>3} x {:>10} = {:>10}",
        line.id.get(),
        line.name,
        line.quantity,
        line.price.to_string(),
        money(line.line_total())
    )
}

/// The cart with its price summary.
pub fn cart(state: &ShopState, pricing: &Pricing) -> String {
    if state.cart().is_empty() {
        return "Your cart is empty.".to_owned();
    }
    let summary = CartSummary::compute(state.cart(), pricing);
    let mut lines: Vec<String> = state.cart().iter().map(cart_line).collect();
    lines.push(String::new());
    lines.extend(summary_lines(&summary));
    lines.join("\n")
}

/// Subtotal, tax, shipping and total, one per line.
pub fn summary_lines(summary: &CartSummary) -> Vec<String> {
    vec![
        format!("Items:     {}", summary.item_count),
        format!("Subtotal:  {}", money(summary.subtotal)),
        format!("Tax:       {}", money(summary.tax)),
        format!("Shipping:  {}", money(summary.shipping)),
        format!("Total:     {}", money(summary.total)),
    ]
}

/// The wishlist.
pub fn wishlist(state: &ShopState) -> String {
    if state.wishlist().is_empty() {
        return "Your wishlist is empty.".to_owned();
    }
    state
        .wishlist()
        .iter()
        .map(|product| {
            format!(
                "{:>3}  {:<34} {:>10}",
                product.id.get(),
                product.name,
                product.price.to_string()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Order history, newest first.
pub fn orders(state: &ShopState) -> String {
    if state.orders().is_empty() {
        return "No orders yet.".to_owned();
    }
    state
        .orders_newest_first()
        .map(|order| {
            format!(
                "#{}  {}  {} item(s)  {}",
                order.id,
                order.date.format("%Y-%m-%d %H:%M UTC"),
                order.item_count(),
                order.total
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One order with its items and delivery details.
pub fn order(order: &Order) -> String {
    let mut lines = vec![
        format!("Order #{}", order.id),
        format!("Placed:   {}", order.date.format("%Y-%m-%d %H:%M UTC")),
        format!("Name:     {}", order.name),
        format!("Email:    {}", order.email),
        format!("Address:  {}", order.address),
        String::new(),
    ];
    lines.extend(order.items.iter().map(cart_line));
    lines.push(String::new());
    lines.push(format!("Total:    {}", order.total));
    lines.join("\n")
}
