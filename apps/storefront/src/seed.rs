//! # Seed Data
//!
//! The catalog a fresh storefront starts with (no snapshot on disk yet).
//!
//! ## Seeded Catalog
//! ```text
//! ┌──────┬───────────┬────────┬───────┬──────────────────────────┐
//! │  id  │ name      │ price  │ stock │ tiers (qty → rate)       │
//! ├──────┼───────────┼────────┼───────┼──────────────────────────┤
//! │  p1  │ Product 1 │ 10,000 │  20   │ 10 → 10%, 20 → 20%       │
//! │  p2  │ Product 2 │ 20,000 │  20   │ 10 → 15%                 │
//! │  p3  │ Product 3 │ 30,000 │  20   │ 10 → 20%, 30 → 25%       │
//! └──────┴───────────┴────────┴───────┴──────────────────────────┘
//!
//! Coupons: AMOUNT5000 (5,000 off), PERCENT10 (10% off, min 10,000)
//! ```

use storefront_core::{Coupon, DiscountRate, DiscountTier, DiscountType, Money, Product};

use crate::state::Catalog;

/// (id, price, tiers as (quantity, bps), description)
const PRODUCTS: &[(&str, i64, &[(i64, u32)], &str)] = &[
    ("p1", 10_000, &[(10, 1000), (20, 2000)], "Entry-level everyday item"),
    ("p2", 20_000, &[(10, 1500)], "Mid-range bestseller"),
    ("p3", 30_000, &[(10, 2000), (30, 2500)], "Premium pick for bulk buyers"),
];

const SEED_STOCK: i64 = 20;

pub fn seed_products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .enumerate()
        .map(|(i, (id, price, tiers, description))| Product {
            id: id.to_string(),
            name: format!("Product {}", i + 1),
            price: Money::from_minor(*price),
            stock: SEED_STOCK,
            discounts: tiers
                .iter()
                .map(|&(quantity, bps)| DiscountTier::new(quantity, DiscountRate::from_bps(bps)))
                .collect(),
            description: Some(description.to_string()),
        })
        .collect()
}

pub fn seed_coupons() -> Vec<Coupon> {
    vec![
        Coupon {
            name: "5,000 off".to_string(),
            code: "AMOUNT5000".to_string(),
            discount_type: DiscountType::Amount,
            discount_value: 5000,
        },
        Coupon {
            name: "10% off".to_string(),
            code: "PERCENT10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 10,
        },
    ]
}

pub fn seed_catalog() -> Catalog {
    Catalog::new(seed_products(), seed_coupons())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::validation::{validate_coupon, validate_product};

    #[test]
    fn test_seed_data_is_valid() {
        let catalog = seed_catalog();
        assert_eq!(catalog.products.len(), 3);

        for product in &catalog.products {
            validate_product(product).unwrap();
        }
        for (i, coupon) in catalog.coupons.iter().enumerate() {
            validate_coupon(coupon, &catalog.coupons[..i]).unwrap();
        }
    }
}
