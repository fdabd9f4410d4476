//! # Cart Mutations
//!
//! Value transformations over [`Cart`]: `new_cart = f(&old_cart, event)`.
//! The input cart is never modified; on rejection the caller simply keeps
//! the old value.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI Action           Function              Guard                        │
//! │  ─────────           ────────              ─────                        │
//! │  Add to cart ──────► add_to_cart ────────► can_increment                │
//! │  "+" / "−" / input ► update_quantity ────► can_set_quantity (qty > 0)   │
//! │                                            qty <= 0 → line removed      │
//! │  Remove ───────────► remove_from_cart                                   │
//! │  Admin edits stock ► sync_product ───────► clamp to new stock           │
//! │  Complete order ───► Cart::new()                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::catalog::{can_increment, can_set_quantity, remaining_stock};
use crate::error::{CoreError, CoreResult};
use crate::types::{Cart, CartLine, Product};

/// Adds one unit of `product`, creating the line or incrementing it.
///
/// ## Returns
/// - `Ok(new_cart)` with at most one line for `product.id`
/// - `Err(InsufficientStock)` when nothing is left to add
///
/// ```rust
/// use storefront_core::cart::add_to_cart;
/// use storefront_core::{Cart, Money, Product};
///
/// let product = Product {
///     id: "p1".into(),
///     name: "Product 1".into(),
///     price: Money::from_minor(10000),
///     stock: 1,
///     discounts: vec![],
///     description: None,
/// };
/// let cart = add_to_cart(&Cart::new(), &product).unwrap();
/// assert_eq!(cart.quantity_of("p1"), 1);
/// assert!(add_to_cart(&cart, &product).is_err());
/// ```
pub fn add_to_cart(cart: &Cart, product: &Product) -> CoreResult<Cart> {
    if !can_increment(product, cart) {
        return Err(CoreError::InsufficientStock {
            product_id: product.id.clone(),
            available: remaining_stock(product, cart).max(0),
            requested: 1,
        });
    }

    let mut next = cart.clone();
    match next.lines.iter_mut().find(|l| l.product.id == product.id) {
        Some(line) => {
            line.quantity += 1;
            line.product = product.clone();
        }
        None => next.lines.push(CartLine::new(product.clone(), 1)),
    }

    Ok(next)
}

/// Sets the quantity of an existing line.
///
/// ## Behavior
/// - `new_quantity <= 0`: the line is removed
/// - `new_quantity > product.stock`: `InsufficientStock`, nothing changes
/// - product not in cart: `ProductNotFound`
///
/// `product` is the current catalog entry; its stock is what the guard
/// checks, not the snapshot held by the line.
pub fn update_quantity(cart: &Cart, product: &Product, new_quantity: i64) -> CoreResult<Cart> {
    if cart.line(&product.id).is_none() {
        return Err(CoreError::ProductNotFound(product.id.clone()));
    }

    if new_quantity <= 0 {
        return Ok(remove_from_cart(cart, &product.id));
    }

    if !can_set_quantity(product, new_quantity) {
        return Err(CoreError::InsufficientStock {
            product_id: product.id.clone(),
            available: product.stock,
            requested: new_quantity,
        });
    }

    let mut next = cart.clone();
    if let Some(line) = next.lines.iter_mut().find(|l| l.product.id == product.id) {
        line.quantity = new_quantity;
        line.product = product.clone();
    }

    Ok(next)
}

/// Removes the line for `product_id`. Absent ids leave the cart as is.
pub fn remove_from_cart(cart: &Cart, product_id: &str) -> Cart {
    Cart {
        lines: cart
            .lines
            .iter()
            .filter(|l| l.product.id != product_id)
            .cloned()
            .collect(),
    }
}

/// Refreshes a line after the catalog entry changed.
///
/// The line picks up the new price, tiers and name. If the new stock is
/// below the line's quantity the line is clamped to it, and removed when the
/// stock is zero, so the stock guard invariant keeps holding.
pub fn sync_product(cart: &Cart, product: &Product) -> Cart {
    Cart {
        lines: cart
            .lines
            .iter()
            .filter_map(|line| {
                if line.product.id != product.id {
                    return Some(line.clone());
                }
                let quantity = line.quantity.min(product.stock);
                (quantity > 0).then(|| CartLine::new(product.clone(), quantity))
            })
            .collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cart_of, product};
    use crate::Money;

    #[test]
    fn test_add_creates_then_increments() {
        let p1 = product("p1", 10000, 20);

        let cart = add_to_cart(&Cart::new(), &p1).unwrap();
        let cart = add_to_cart(&cart, &p1).unwrap();

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let p1 = product("p1", 10000, 20);
        let p2 = product("p2", 20000, 20);

        let cart = add_to_cart(&Cart::new(), &p2).unwrap();
        let cart = add_to_cart(&cart, &p1).unwrap();
        let cart = add_to_cart(&cart, &p2).unwrap();

        let ids: Vec<_> = cart.lines.iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);
    }

    #[test]
    fn test_add_rejected_at_stock_limit() {
        let p1 = product("p1", 10000, 2);
        let cart = cart_of(&[(&p1, 2)]);

        let err = add_to_cart(&cart, &p1).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                product_id: "p1".to_string(),
                available: 0,
                requested: 1,
            }
        );
        // Input untouched
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn test_update_quantity() {
        let p1 = product("p1", 10000, 20);
        let cart = cart_of(&[(&p1, 1)]);

        let updated = update_quantity(&cart, &p1, 20).unwrap();
        assert_eq!(updated.quantity_of("p1"), 20);
        assert_eq!(cart.quantity_of("p1"), 1);
    }

    #[test]
    fn test_update_quantity_over_stock_rejected() {
        let p1 = product("p1", 10000, 20);
        let cart = cart_of(&[(&p1, 5)]);

        let err = update_quantity(&cart, &p1, 21).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { available: 20, requested: 21, .. }
        ));
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let p1 = product("p1", 10000, 20);
        let p2 = product("p2", 20000, 20);
        let cart = cart_of(&[(&p1, 3), (&p2, 1)]);

        let updated = update_quantity(&cart, &p1, 0).unwrap();
        assert_eq!(updated.lines.len(), 1);
        assert_eq!(updated.quantity_of("p1"), 0);

        let updated = update_quantity(&cart, &p1, -4).unwrap();
        assert!(updated.line("p1").is_none());
    }

    #[test]
    fn test_update_quantity_unknown_line() {
        let p1 = product("p1", 10000, 20);
        let err = update_quantity(&Cart::new(), &p1, 1).unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound("p1".to_string()));
    }

    #[test]
    fn test_remove_from_cart() {
        let p1 = product("p1", 10000, 20);
        let cart = cart_of(&[(&p1, 3)]);

        assert!(remove_from_cart(&cart, "p1").is_empty());
        assert_eq!(remove_from_cart(&cart, "p9"), cart);
    }

    #[test]
    fn test_sync_product_clamps_and_refreshes() {
        let p1 = product("p1", 10000, 20);
        let p2 = product("p2", 20000, 20);
        let cart = cart_of(&[(&p1, 8), (&p2, 1)]);

        let mut edited = p1.clone();
        edited.stock = 5;
        edited.price = Money::from_minor(12000);

        let synced = sync_product(&cart, &edited);
        assert_eq!(synced.quantity_of("p1"), 5);
        assert_eq!(synced.line("p1").unwrap().product.price.minor(), 12000);
        assert_eq!(synced.quantity_of("p2"), 1);

        edited.stock = 0;
        assert!(sync_product(&cart, &edited).line("p1").is_none());
    }
}
