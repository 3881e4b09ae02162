//! Cart pricing and order placement.
//!
//! Checkout runs before anything reaches the reducer: it validates the
//! customer form and turns the current cart into a fully formed [`Order`].
//! The reducer only ever sees the finished order.

use chrono::{DateTime, Utc};
use merch_shop_core::{CartLine, Email, EmailError, Order, OrderId, Price, PriceError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons an order cannot be placed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("cart is empty")]
    EmptyCart,
    #[error("invalid order total: {0}")]
    InvalidTotal(#[from] PriceError),
    #[error("order total is too large")]
    TotalOverflow,
}

/// Tax and shipping applied to the cart summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    /// Fraction of the subtotal charged as tax.
    pub tax_rate: Decimal,
    /// Flat shipping charge for a non-empty cart.
    pub shipping_fee: Price,
}

impl Pricing {
    /// 18% tax.
    pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);
    /// Flat shipping in rupees.
    pub const DEFAULT_SHIPPING_FEE: u32 = 60;
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            tax_rate: Self::DEFAULT_TAX_RATE,
            shipping_fee: Price::whole(Self::DEFAULT_SHIPPING_FEE),
        }
    }
}

/// Totals shown on the cart screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub item_count: u32,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl CartSummary {
    /// Price a cart. An empty cart costs nothing, shipping included.
    ///
    /// Amounts too large for a `Decimal` saturate at [`Decimal::MAX`].
    #[must_use]
    pub fn compute(cart: &[CartLine], pricing: &Pricing) -> Self {
        let item_count = cart
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity));
        let subtotal = subtotal(cart).unwrap_or(Decimal::MAX);
        let tax = subtotal.saturating_mul(pricing.tax_rate).round_dp(2);
        let shipping = if cart.is_empty() {
            Decimal::ZERO
        } else {
            pricing.shipping_fee.amount()
        };

        Self {
            item_count,
            subtotal,
            tax,
            shipping,
            total: subtotal.saturating_add(tax).saturating_add(shipping),
        }
    }
}

/// Customer details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
}

fn required(value: &str, field: &'static str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

fn subtotal(cart: &[CartLine]) -> Option<Decimal> {
    cart.iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(line.checked_line_total()?)
    })
}

/// Build the order for `cart`.
///
/// The order id is `now` in milliseconds, moved past the newest existing
/// order id when two checkouts land in the same millisecond (or the clock
/// went backwards). The total is the cart subtotal.
///
/// # Errors
///
/// Returns [`CheckoutError`] if a form field is blank, the email is invalid,
/// the cart is empty or its total does not fit in a `Decimal`.
pub fn build_order(
    cart: &[CartLine],
    existing: &[Order],
    form: &CheckoutForm,
    now: DateTime<Utc>,
) -> Result<Order, CheckoutError> {
    let name = required(&form.name, "name")?;
    let email = Email::parse(&required(&form.email, "email")?)?;
    let address = required(&form.address, "address")?;

    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let stamp = now.timestamp_millis();
    let id = existing
        .iter()
        .map(|order| order.id.get())
        .max()
        .map_or(stamp, |newest| stamp.max(newest.saturating_add(1)));

    Ok(Order {
        id: OrderId::new(id),
        name,
        email,
        address,
        items: cart.to_vec(),
        total: Price::new(subtotal(cart).ok_or(CheckoutError::TotalOverflow)?)?,
        date: now,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use merch_shop_core::ProductId;

    use super::*;
    use crate::catalog::Catalog;

    fn line(id: i32, quantity: u32) -> CartLine {
        CartLine::new(
            Catalog::builtin().get(ProductId::new(id)).unwrap().clone(),
            quantity,
        )
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "  Asha Rao ".to_owned(),
            email: "asha@example.com".to_owned(),
            address: "Hostel 4, Pilani".to_owned(),
        }
    }

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_summary_of_empty_cart_is_zero() {
        let summary = CartSummary::compute(&[], &Pricing::default());
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.shipping, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::ZERO);
    }

    #[test]
    fn test_summary_applies_tax_and_shipping() {
        // 2 x 599 + 1 x 149 = 1347; tax 242.46; shipping 60
        let cart = [line(1, 2), line(13, 1)];
        let summary = CartSummary::compute(&cart, &Pricing::default());
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, Decimal::from(1347));
        assert_eq!(summary.tax, Decimal::new(24246, 2));
        assert_eq!(summary.shipping, Decimal::from(60));
        assert_eq!(summary.total, Decimal::new(164_946, 2));
    }

    #[test]
    fn test_build_order() {
        let cart = [line(5, 1), line(16, 3)];
        let order = build_order(&cart, &[], &form(), at(1_700_000_000_000)).unwrap();
        assert_eq!(order.id, OrderId::new(1_700_000_000_000));
        assert_eq!(order.name, "Asha Rao");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total, Price::whole(799 + 3 * 69));
        assert_eq!(order.date, at(1_700_000_000_000));
    }

    #[test]
    fn test_order_ids_stay_unique_within_a_millisecond() {
        let cart = [line(5, 1)];
        let first = build_order(&cart, &[], &form(), at(1_000)).unwrap();
        let second = build_order(&cart, &[first.clone()], &form(), at(1_000)).unwrap();
        let third = build_order(&cart, &[first, second.clone()], &form(), at(500)).unwrap();
        assert_eq!(second.id, OrderId::new(1_001));
        assert_eq!(third.id, OrderId::new(1_002));
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let cart = [line(1, 1)];
        let mut blank = form();
        blank.address = "   ".to_owned();
        assert_eq!(
            build_order(&cart, &[], &blank, at(0)),
            Err(CheckoutError::MissingField("address"))
        );
        blank.name = String::new();
        assert_eq!(
            build_order(&cart, &[], &blank, at(0)),
            Err(CheckoutError::MissingField("name"))
        );
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut bad = form();
        bad.email = "asha@localhost".to_owned();
        assert_eq!(
            build_order(&[line(1, 1)], &[], &bad, at(0)),
            Err(CheckoutError::InvalidEmail(EmailError::MissingDomainDot))
        );
    }

    fn huge_line(quantity: u32) -> CartLine {
        let mut product = Catalog::builtin().get(ProductId::new(1)).unwrap().clone();
        product.price = Price::new(Decimal::from_i128_with_scale(10_i128.pow(25), 0)).unwrap();
        CartLine::new(product, quantity)
    }

    #[test]
    fn test_summary_saturates_on_overflow() {
        let summary = CartSummary::compute(&[huge_line(100_000)], &Pricing::default());
        assert_eq!(summary.subtotal, Decimal::MAX);
        assert_eq!(summary.total, Decimal::MAX);

        let summary = CartSummary::compute(&[huge_line(5), huge_line(5)], &Pricing::default());
        assert_eq!(summary.item_count, 10);
        assert!(summary.total > summary.subtotal);
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        assert_eq!(
            build_order(&[huge_line(100_000)], &[], &form(), at(0)),
            Err(CheckoutError::TotalOverflow)
        );
        // Each line fits but their sum does not.
        let lines = vec![huge_line(7_000); 2];
        assert_eq!(
            build_order(&lines, &[], &form(), at(0)),
            Err(CheckoutError::TotalOverflow)
        );
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        assert_eq!(
            build_order(&[], &[], &form(), at(0)),
            Err(CheckoutError::EmptyCart)
        );
    }
}
