//! # Pricing
//!
//! Line discount resolution, line totals and cart aggregation.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each line:                                                         │
//! │                                                                         │
//! │    tier_rate(line)            max tier rate with tier.qty <= line.qty   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    is_bulk_purchase(cart)     ANY line in the cart has qty >= 10        │
//! │         │                                                               │
//! │         ├── yes ──► min(tier_rate + 0.05, 0.50)                         │
//! │         └── no  ──► tier_rate                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    line_total = round(price × qty × (1 − rate))   ← rounded per line    │
//! │                                                                         │
//! │  subtotal = Σ line_total                                                │
//! │  total    = apply_coupon(selected, subtotal)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The bulk bonus is cart-wide: ten units of product A unlock it for product
//! B's line too. That is why every function here takes the whole cart and
//! nothing is memoized per line.

use crate::coupon::apply_coupon;
use crate::money::Money;
use crate::types::{Cart, CartLine, CartTotals, Coupon, DiscountRate, Product};
use crate::{BULK_PURCHASE_BONUS, BULK_PURCHASE_THRESHOLD, MAX_LINE_DISCOUNT};

// =============================================================================
// Line Discount Resolver
// =============================================================================

/// Best tier rate the line's quantity qualifies for, `0` if none.
///
/// Tiers are not summed; the single best qualifying one wins.
pub fn tier_rate(line: &CartLine) -> DiscountRate {
    line.product
        .discounts
        .iter()
        .filter(|tier| tier.quantity <= line.quantity)
        .fold(DiscountRate::zero(), |best, tier| best.max(tier.rate))
}

/// Best rate any quantity of `product` can unlock through its tiers.
///
/// Used by the catalog for "up to N% off" labels; ignores the bulk bonus.
pub fn max_tier_rate(product: &Product) -> DiscountRate {
    product
        .discounts
        .iter()
        .fold(DiscountRate::zero(), |best, tier| best.max(tier.rate))
}

/// True iff any line in the cart has reached the bulk-purchase threshold.
pub fn is_bulk_purchase(cart: &Cart) -> bool {
    cart.lines.iter().any(|l| l.quantity >= BULK_PURCHASE_THRESHOLD)
}

/// Discount rate for `line` given the whole `cart`, in `[0, 0.5]`.
///
/// ## Example
/// ```rust
/// use storefront_core::pricing::resolve_line_discount_rate;
/// use storefront_core::{Cart, CartLine, DiscountRate, DiscountTier, Money, Product};
///
/// let product = |id: &str, discounts| Product {
///     id: id.into(),
///     name: id.into(),
///     price: Money::from_minor(10000),
///     stock: 50,
///     discounts,
///     description: None,
/// };
/// let a = product("a", vec![]);
/// let b = product("b", vec![DiscountTier::new(1, DiscountRate::from_bps(1000))]);
///
/// let cart = Cart {
///     lines: vec![CartLine::new(a, 10), CartLine::new(b, 1)],
/// };
/// // b's own tier (10%) plus the bulk bonus unlocked by a's line (5%)
/// let rate = resolve_line_discount_rate(&cart.lines[1], &cart);
/// assert_eq!(rate, DiscountRate::from_bps(1500));
/// ```
pub fn resolve_line_discount_rate(line: &CartLine, cart: &Cart) -> DiscountRate {
    let base = tier_rate(line);

    if is_bulk_purchase(cart) {
        base.plus_capped(BULK_PURCHASE_BONUS, MAX_LINE_DISCOUNT)
    } else {
        // Tiers restored from a snapshot skip admin validation
        base.min(MAX_LINE_DISCOUNT)
    }
}

// =============================================================================
// Line Total Calculator
// =============================================================================

/// `round(price × quantity × (1 − rate))`, rounded half-up at the line.
pub fn line_total(line: &CartLine, cart: &Cart) -> Money {
    line.gross()
        .apply_rate_discount(resolve_line_discount_rate(line, cart))
}

/// Whole-percent saving of the line against its undiscounted price.
///
/// Derived from the rounded totals, so it is what the customer actually sees
/// (`1 − line_total / gross`, rounded). `0` for a free or empty line.
pub fn line_discount_percent(line: &CartLine, cart: &Cart) -> u32 {
    let gross = line.gross().minor();
    if gross <= 0 {
        return 0;
    }

    let saved = (gross - line_total(line, cart).minor()) as i128;
    ((saved * 100 + gross as i128 / 2) / gross as i128) as u32
}

// =============================================================================
// Cart Aggregator
// =============================================================================

/// Σ price × quantity, before any discount.
pub fn total_before_discount(cart: &Cart) -> Money {
    cart.lines.iter().map(CartLine::gross).sum()
}

/// Σ of the already-rounded line totals. The coupon applies to this.
pub fn subtotal_after_line_discounts(cart: &Cart) -> Money {
    cart.lines.iter().map(|l| line_total(l, cart)).sum()
}

/// Recomputes both cart totals from scratch.
///
/// The coupon is applied as given; eligibility is enforced when it is
/// selected (see [`crate::coupon::select_coupon`]), not here, so totals stay
/// computable while the UI explains a rejection.
///
/// ## Example
/// ```rust
/// use storefront_core::pricing::cart_totals;
/// use storefront_core::{Cart, CartLine, Coupon, DiscountType, Money, Product};
///
/// let product = Product {
///     id: "p1".into(),
///     name: "Product 1".into(),
///     price: Money::from_minor(10000),
///     stock: 20,
///     discounts: vec![],
///     description: None,
/// };
/// let cart = Cart { lines: vec![CartLine::new(product, 5)] };
/// let coupon = Coupon {
///     name: "10% off".into(),
///     code: "PERCENT10".into(),
///     discount_type: DiscountType::Percentage,
///     discount_value: 10,
/// };
///
/// let totals = cart_totals(&cart, Some(&coupon));
/// assert_eq!(totals.total_before_discount.minor(), 50000);
/// assert_eq!(totals.total_after_discount.minor(), 45000);
/// ```
pub fn cart_totals(cart: &Cart, selected_coupon: Option<&Coupon>) -> CartTotals {
    let subtotal = subtotal_after_line_discounts(cart);

    CartTotals {
        total_before_discount: total_before_discount(cart),
        total_after_discount: apply_coupon(selected_coupon, subtotal),
    }
}

/// Σ quantity across lines (the header's item badge).
pub fn total_quantity(cart: &Cart) -> i64 {
    cart.lines.iter().map(|l| l.quantity).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
