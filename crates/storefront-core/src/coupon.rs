//! # Coupon Eligibility & Application
//!
//! ## Selection vs Application
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer picks a coupon                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  select_coupon ── is_coupon_applicable? ── no ──► CouponNotApplicable   │
//! │       │ yes                                       (selection unchanged) │
//! │       ▼                                                                 │
//! │  caller stores the selection                                            │
//! │       │                                                                 │
//! │       ▼  every render / mutation                                        │
//! │  reconcile_selected_coupon ── cart empty / code deleted / ineligible    │
//! │       │                        └──► None                                │
//! │       ▼                                                                 │
//! │  cart_totals → apply_coupon   (no eligibility check at this point)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::catalog::find_coupon;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::subtotal_after_line_discounts;
use crate::types::{Cart, Coupon, DiscountType};
use crate::PERCENTAGE_COUPON_MIN_SUBTOTAL;

/// Eligibility gate for a coupon at the given subtotal (after line discounts).
///
/// Percentage coupons need a subtotal of at least
/// [`PERCENTAGE_COUPON_MIN_SUBTOTAL`]. Amount coupons are always eligible; a
/// small cart simply floors at zero.
///
/// ```rust
/// use storefront_core::coupon::is_coupon_applicable;
/// use storefront_core::{Coupon, DiscountType, Money};
///
/// let coupon = Coupon {
///     name: "10% off".into(),
///     code: "PERCENT10".into(),
///     discount_type: DiscountType::Percentage,
///     discount_value: 10,
/// };
/// assert!(!is_coupon_applicable(&coupon, Money::from_minor(9999)));
/// assert!(is_coupon_applicable(&coupon, Money::from_minor(10000)));
/// ```
pub fn is_coupon_applicable(coupon: &Coupon, subtotal: Money) -> bool {
    match coupon.discount_type {
        DiscountType::Amount => true,
        DiscountType::Percentage => subtotal >= PERCENTAGE_COUPON_MIN_SUBTOTAL,
    }
}

/// Applies the selected coupon, if any, to a subtotal.
///
/// Performs no eligibility check. Callers enforce eligibility when the coupon
/// is selected.
pub fn apply_coupon(coupon: Option<&Coupon>, subtotal: Money) -> Money {
    let Some(coupon) = coupon else {
        return subtotal;
    };

    match coupon.discount_type {
        DiscountType::Amount => {
            subtotal.saturating_sub_to_zero(Money::from_minor(coupon.discount_value))
        }
        DiscountType::Percentage => subtotal.apply_percentage_off(coupon.discount_value),
    }
}

/// Validates a selection against the current cart.
///
/// Returns the coupon to store, or `CouponNotApplicable`; the caller keeps
/// its previous selection on error.
pub fn select_coupon(coupon: &Coupon, cart: &Cart) -> CoreResult<Coupon> {
    let subtotal = subtotal_after_line_discounts(cart);

    if !is_coupon_applicable(coupon, subtotal) {
        return Err(CoreError::CouponNotApplicable {
            code: coupon.code.clone(),
            subtotal: subtotal.minor(),
            minimum: PERCENTAGE_COUPON_MIN_SUBTOTAL.minor(),
        });
    }

    Ok(coupon.clone())
}

/// Re-checks a stored selection after any cart or coupon-catalog change.
///
/// Cleared when the cart is empty, when the code no longer exists in
/// `coupons`, or when the coupon is no longer eligible. A surviving selection
/// is refreshed from the catalog so admin edits to it take effect.
pub fn reconcile_selected_coupon(
    selected: Option<&Coupon>,
    coupons: &[Coupon],
    cart: &Cart,
) -> Option<Coupon> {
    let selected = selected?;
    if cart.is_empty() {
        return None;
    }

    let current = find_coupon(coupons, &selected.code)?;
    select_coupon(current, cart).ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{amount_coupon, cart_of, coupons, percent_coupon, product};

    #[test]
    fn test_percentage_gate() {
        let coupon = percent_coupon("PERCENT10", 10);
        assert!(!is_coupon_applicable(&coupon, Money::from_minor(9999)));
        assert!(is_coupon_applicable(&coupon, Money::from_minor(10000)));
    }

    #[test]
    fn test_amount_always_applicable() {
        let coupon = amount_coupon("AMOUNT5000", 5000);
        assert!(is_coupon_applicable(&coupon, Money::zero()));
        assert!(is_coupon_applicable(&coupon, Money::from_minor(1)));
    }

    #[test]
    fn test_apply_coupon() {
        let subtotal = Money::from_minor(50000);

        assert_eq!(apply_coupon(None, subtotal), subtotal);
        assert_eq!(
            apply_coupon(Some(&percent_coupon("PERCENT10", 10)), subtotal).minor(),
            45000
        );
        assert_eq!(
            apply_coupon(Some(&amount_coupon("AMOUNT5000", 5000)), subtotal).minor(),
            45000
        );
    }

    #[test]
    fn test_amount_coupon_floors_at_zero() {
        let coupon = amount_coupon("BIG", 50000);
        assert_eq!(apply_coupon(Some(&coupon), Money::from_minor(20000)).minor(), 0);
    }

    #[test]
    fn test_select_coupon_rejects_ineligible() {
        let p = product("p1", 9999, 10);
        let cart = cart_of(&[(&p, 1)]);

        let err = select_coupon(&percent_coupon("PERCENT10", 10), &cart).unwrap_err();
        assert_eq!(
            err,
            CoreError::CouponNotApplicable {
                code: "PERCENT10".to_string(),
                subtotal: 9999,
                minimum: 10000,
            }
        );

        let ok = select_coupon(&amount_coupon("AMOUNT5000", 5000), &cart).unwrap();
        assert_eq!(ok.code, "AMOUNT5000");
    }

    #[test]
    fn test_select_uses_subtotal_after_line_discounts() {
        // 10 × 1050 = 10500 gross, bulk bonus → 9975 < 10000
        let p = product("p1", 1050, 20);
        let cart = cart_of(&[(&p, 10)]);
        assert!(select_coupon(&percent_coupon("PERCENT10", 10), &cart).is_err());
    }

    #[test]
    fn test_reconcile_clears_on_empty_cart() {
        let coupon = amount_coupon("AMOUNT5000", 5000);
        assert_eq!(
            reconcile_selected_coupon(Some(&coupon), &coupons(), &Cart::new()),
            None
        );
    }

    #[test]
    fn test_reconcile_clears_deleted_code() {
        let p = product("p1", 20000, 10);
        let cart = cart_of(&[(&p, 1)]);
        let deleted = amount_coupon("GONE", 1000);
        assert_eq!(reconcile_selected_coupon(Some(&deleted), &coupons(), &cart), None);
    }

    #[test]
    fn test_reconcile_clears_when_no_longer_eligible() {
        let p = product("p1", 6000, 10);
        let selected = percent_coupon("PERCENT10", 10);

        let cart = cart_of(&[(&p, 2)]);
        assert!(reconcile_selected_coupon(Some(&selected), &coupons(), &cart).is_some());

        let cart = cart_of(&[(&p, 1)]);
        assert_eq!(reconcile_selected_coupon(Some(&selected), &coupons(), &cart), None);
    }

    #[test]
    fn test_reconcile_keeps_none() {
        let p = product("p1", 20000, 10);
        let cart = cart_of(&[(&p, 1)]);
        assert_eq!(reconcile_selected_coupon(None, &coupons(), &cart), None);
    }
}
