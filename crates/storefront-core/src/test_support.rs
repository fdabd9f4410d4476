//! Shared fixtures for unit tests.

use crate::money::Money;
use crate::types::{Cart, CartLine, Coupon, DiscountRate, DiscountTier, DiscountType, Product};

pub(crate) fn product(id: &str, price: i64, stock: i64) -> Product {
    tiered_product(id, price, stock, &[])
}

/// `tiers` are `(quantity, bps)` pairs.
pub(crate) fn tiered_product(id: &str, price: i64, stock: i64, tiers: &[(i64, u32)]) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {}", id),
        price: Money::from_minor(price),
        stock,
        discounts: tiers
            .iter()
            .map(|&(quantity, bps)| DiscountTier::new(quantity, DiscountRate::from_bps(bps)))
            .collect(),
        description: None,
    }
}

pub(crate) fn cart_of(lines: &[(&Product, i64)]) -> Cart {
    Cart {
        lines: lines
            .iter()
            .map(|&(p, qty)| CartLine::new(p.clone(), qty))
            .collect(),
    }
}

pub(crate) fn amount_coupon(code: &str, value: i64) -> Coupon {
    Coupon {
        name: format!("{} off", value),
        code: code.to_string(),
        discount_type: DiscountType::Amount,
        discount_value: value,
    }
}

pub(crate) fn percent_coupon(code: &str, value: i64) -> Coupon {
    Coupon {
        name: format!("{}% off", value),
        code: code.to_string(),
        discount_type: DiscountType::Percentage,
        discount_value: value,
    }
}

pub(crate) fn coupons() -> Vec<Coupon> {
    vec![
        amount_coupon("AMOUNT5000", 5000),
        percent_coupon("PERCENT10", 10),
    ]
}
