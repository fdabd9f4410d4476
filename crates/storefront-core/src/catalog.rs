//! # Catalog Lookup & Stock Guard
//!
//! Resolves products and coupons from the in-memory catalog and answers the
//! one stock question every cart mutation asks: how many are still left?
//!
//! ## Remaining Stock
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product.stock = 20                                                     │
//! │  cart: [{ p1, qty: 15 }]                                                │
//! │                                                                         │
//! │  remaining_stock(p1, cart) = 20 − 15 = 5                                │
//! │                                                                         │
//! │  can_increment         → 5 > 0      → true   ("Add to cart" enabled)   │
//! │  can_set_quantity(21)  → 21 > 20    → false  (input rejected)          │
//! │  can_set_quantity(0)   → false      → caller removes the line          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Remaining stock is derived from the cart on every call. Nothing is ever
//! reserved or written back to the product.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Cart, Coupon, Product};
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Lookup
// =============================================================================

/// Finds a product by id.
pub fn find_product<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id == id)
}

/// Finds a coupon by its unique code.
pub fn find_coupon<'a>(coupons: &'a [Coupon], code: &str) -> Option<&'a Coupon> {
    coupons.iter().find(|c| c.code == code)
}

/// Filters the catalog by a case-insensitive match on name or description.
///
/// A blank query returns the whole catalog in its original order.
///
/// ```rust
/// use storefront_core::catalog::search_products;
/// use storefront_core::{Money, Product};
///
/// let products = vec![Product {
///     id: "p1".into(),
///     name: "Wireless Mouse".into(),
///     price: Money::from_minor(25000),
///     stock: 10,
///     discounts: vec![],
///     description: Some("Quiet clicks".into()),
/// }];
/// assert_eq!(search_products(&products, "mouse").len(), 1);
/// assert_eq!(search_products(&products, "QUIET").len(), 1);
/// assert!(search_products(&products, "keyboard").is_empty());
/// ```
pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.iter().collect();
    }

    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

// =============================================================================
// Stock Guard
// =============================================================================

/// `product.stock − quantity of product in cart` (or `0` if absent).
///
/// Negative only when a caller bypassed the guard; treat `<= 0` as
/// "not purchasable".
pub fn remaining_stock(product: &Product, cart: &Cart) -> i64 {
    product.stock - cart.quantity_of(&product.id)
}

/// True iff one more unit can be added (`remaining_stock > 0`).
///
/// Gates both "add to cart" and the "+" button on an existing line.
pub fn can_increment(product: &Product, cart: &Cart) -> bool {
    remaining_stock(product, cart) > 0
}

/// True iff `0 < new_quantity <= product.stock`.
///
/// A quantity of `0` or less is not a stock failure; it means the line is
/// being removed, which [`crate::cart::update_quantity`] handles.
pub fn can_set_quantity(product: &Product, new_quantity: i64) -> bool {
    new_quantity > 0 && new_quantity <= product.stock
}

/// Catalog badge state for a product given the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum StockStatus {
    /// Nothing left to add.
    SoldOut,
    /// Only a handful left.
    LowStock { remaining: i64 },
    InStock { remaining: i64 },
}

/// Classifies remaining stock for display.
pub fn stock_status(product: &Product, cart: &Cart) -> StockStatus {
    match remaining_stock(product, cart) {
        r if r <= 0 => StockStatus::SoldOut,
        r if r <= LOW_STOCK_THRESHOLD => StockStatus::LowStock { remaining: r },
        r => StockStatus::InStock { remaining: r },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cart_of, product};

    #[test]
    fn test_remaining_stock() {
        let p1 = product("p1", 10000, 20);
        let p2 = product("p2", 20000, 20);

        assert_eq!(remaining_stock(&p1, &Cart::new()), 20);

        let cart = cart_of(&[(&p1, 15)]);
        assert_eq!(remaining_stock(&p1, &cart), 5);
        // Other products are unaffected
        assert_eq!(remaining_stock(&p2, &cart), 20);
    }

    #[test]
    fn test_can_increment() {
        let p1 = product("p1", 10000, 2);

        assert!(can_increment(&p1, &cart_of(&[(&p1, 1)])));
        assert!(!can_increment(&p1, &cart_of(&[(&p1, 2)])));

        let empty = product("p0", 10000, 0);
        assert!(!can_increment(&empty, &Cart::new()));
    }

    #[test]
    fn test_can_increment_false_when_over_reserved() {
        let p1 = product("p1", 10000, 2);
        let cart = cart_of(&[(&p1, 5)]);
        assert_eq!(remaining_stock(&p1, &cart), -3);
        assert!(!can_increment(&p1, &cart));
    }

    #[test]
    fn test_can_set_quantity() {
        let p1 = product("p1", 10000, 20);

        assert!(can_set_quantity(&p1, 1));
        assert!(can_set_quantity(&p1, 20));
        assert!(!can_set_quantity(&p1, 21));
        assert!(!can_set_quantity(&p1, 0));
        assert!(!can_set_quantity(&p1, -1));
    }

    #[test]
    fn test_stock_status() {
        let p1 = product("p1", 10000, 20);

        assert_eq!(
            stock_status(&p1, &Cart::new()),
            StockStatus::InStock { remaining: 20 }
        );
        assert_eq!(
            stock_status(&p1, &cart_of(&[(&p1, 15)])),
            StockStatus::LowStock { remaining: 5 }
        );
        assert_eq!(stock_status(&p1, &cart_of(&[(&p1, 20)])), StockStatus::SoldOut);
    }

    #[test]
    fn test_find_product_and_coupon() {
        let products = vec![product("p1", 10000, 20), product("p2", 20000, 20)];
        assert_eq!(find_product(&products, "p2").map(|p| p.price.minor()), Some(20000));
        assert!(find_product(&products, "p9").is_none());

        let coupons = crate::test_support::coupons();
        assert!(find_coupon(&coupons, "AMOUNT5000").is_some());
        assert!(find_coupon(&coupons, "amount5000").is_none());
    }

    #[test]
    fn test_search_blank_query_returns_all() {
        let products = vec![product("p1", 10000, 20), product("p2", 20000, 20)];
        assert_eq!(search_products(&products, "   ").len(), 2);
        assert_eq!(search_products(&products, "product p2").len(), 1);
    }
}
