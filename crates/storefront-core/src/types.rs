//! # Domain Types
//!
//! Plain data shared between the engine and its caller.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product        │   │  name           │       │
//! │  │  name           │   │  quantity       │   │  code (unique)  │       │
//! │  │  price (Money)  │   └────────┬────────┘   │  discount_type  │       │
//! │  │  stock          │            │            │  discount_value │       │
//! │  │  discounts[]    │       ┌────┴────┐       └─────────────────┘       │
//! │  └────────┬────────┘       │  Cart   │                                 │
//! │           │                │ lines[] │                                 │
//! │  ┌────────┴────────┐       └─────────┘                                 │
//! │  │  DiscountTier   │                                                   │
//! │  │  quantity, rate │   rate: DiscountRate, a 0–1 fraction in bps       │
//! │  └─────────────────┘   coupon percentage: whole percent 0–100          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Percent Units
//! A tier's [`DiscountRate`] is a fraction (`0.1`) and a coupon's
//! `discount_value` is a whole percent (`10`). They are separate types on
//! purpose and are never converted into each other.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// A tier or bulk discount rate, stored in basis points.
///
/// 1 basis point = 0.01% = 1/10000, so `0.1` is `1000` bps.
///
/// ## Wire Format
/// Serialized as the fraction the browser caller uses (`{"rate": 0.1}`).
/// Rates are stored at basis-point precision: `0.12346` reads back as
/// `0.1235`. Deserializing rejects anything outside `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Basis points in a whole (rate `1.0`).
    pub const SCALE: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a fraction (`0.1` → 1000 bps), rounded to the
    /// nearest basis point.
    ///
    /// Negative inputs saturate to zero.
    pub fn from_fraction(fraction: f64) -> Self {
        DiscountRate((fraction * Self::SCALE as f64).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display and serialization).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Returns the rate as a whole percent, rounded (`0.25` → `25`).
    #[inline]
    pub fn whole_percent(&self) -> u32 {
        (self.0 + 50) / 100
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// `min(self + bonus, cap)`. The cap applies after the addition.
    #[inline]
    pub fn plus_capped(self, bonus: DiscountRate, cap: DiscountRate) -> Self {
        DiscountRate(self.0.saturating_add(bonus.0).min(cap.0))
    }
}

impl Serialize for DiscountRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.fraction())
    }
}

impl<'de> Deserialize<'de> for DiscountRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fraction = f64::deserialize(deserializer)?;
        if !(0.0..1.0).contains(&fraction) {
            return Err(de::Error::invalid_value(
                de::Unexpected::Float(fraction),
                &"a discount rate in [0, 1)",
            ));
        }
        Ok(DiscountRate::from_fraction(fraction))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A quantity-threshold discount attached to a product.
///
/// The tier applies once a line's quantity reaches `quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountTier {
    pub quantity: i64,
    pub rate: DiscountRate,
}

impl DiscountTier {
    pub fn new(quantity: i64, rate: DiscountRate) -> Self {
        DiscountTier { quantity, rate }
    }
}

/// A product in the storefront catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: Money,

    /// Total stock. Never negative.
    pub stock: i64,

    /// Quantity discount tiers, in any order.
    #[serde(default)]
    pub discounts: Vec<DiscountTier>,

    /// Optional description, matched by catalog search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Cart
// =============================================================================

/// One product entry in the cart paired with a positive quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    pub fn new(product: Product, quantity: i64) -> Self {
        CartLine { product, quantity }
    }

    /// Undiscounted price of the line (`price × quantity`).
    #[inline]
    pub fn gross(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

/// The shopping cart, in insertion order.
///
/// ## Invariants
/// - Lines are unique by product id (adding again increments the quantity)
/// - Every quantity is > 0 (a line reduced to zero is removed)
/// - No quantity exceeds its product's stock (see [`crate::catalog`])
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Returns the line for `product_id`, if present.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Quantity of `product_id` in the cart, `0` when absent.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Fixed subtraction in the smallest currency unit.
    Amount,
    /// Whole percent `0..=100` of the subtotal.
    Percentage,
}

/// A cart-level discount selectable by the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub name: String,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
}

// =============================================================================
// Totals
// =============================================================================

/// Derived cart totals. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Σ price × quantity.
    pub total_before_discount: Money,
    /// After line discounts and the coupon, if any.
    pub total_after_discount: Money,
}

impl CartTotals {
    /// Total saved by line discounts and the coupon together.
    #[inline]
    pub fn total_discount(&self) -> Money {
        self.total_before_discount - self.total_after_discount
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_from_fraction() {
        assert_eq!(DiscountRate::from_fraction(0.1).bps(), 1000);
        assert_eq!(DiscountRate::from_fraction(0.05).bps(), 500);
        assert_eq!(DiscountRate::from_fraction(-0.2).bps(), 0);
        assert!((DiscountRate::from_bps(2500).fraction() - 0.25).abs() < 1e-9);
        assert_eq!(DiscountRate::from_bps(2500).whole_percent(), 25);
    }

    #[test]
    fn test_discount_rate_wire_format() {
        let tier: DiscountTier =
            serde_json::from_str(r#"{"quantity": 10, "rate": 0.12346}"#).unwrap();
        assert_eq!(tier.rate.bps(), 1235);
        assert_eq!(serde_json::to_string(&tier.rate).unwrap(), "0.1235");

        for bad in ["1.0", "1.5", "-0.1"] {
            let json = format!(r#"{{"quantity": 10, "rate": {bad}}}"#);
            assert!(serde_json::from_str::<DiscountTier>(&json).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_plus_capped_applies_cap_after_bonus() {
        let cap = DiscountRate::from_bps(5000);
        let bonus = DiscountRate::from_bps(500);
        assert_eq!(DiscountRate::from_bps(2000).plus_capped(bonus, cap).bps(), 2500);
        assert_eq!(DiscountRate::from_bps(4800).plus_capped(bonus, cap).bps(), 5000);
        assert_eq!(DiscountRate::from_bps(9000).plus_capped(bonus, cap).bps(), 5000);
    }

    #[test]
    fn test_product_json_shape() {
        let json = r#"{
            "id": "p1",
            "name": "Product 1",
            "price": 10000,
            "stock": 20,
            "discounts": [{"quantity": 10, "rate": 0.1}, {"quantity": 20, "rate": 0.2}]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Money::from_minor(10000));
        assert_eq!(product.discounts[1].rate, DiscountRate::from_bps(2000));
        assert!(product.description.is_none());

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back["discounts"][0]["rate"], serde_json::json!(0.1));
        assert!(back.get("description").is_none());
    }

    #[test]
    fn test_coupon_json_shape() {
        let json = r#"{"name":"10% off","code":"PERCENT10","discountType":"percentage","discountValue":10}"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.discount_type, DiscountType::Percentage);
        assert_eq!(coupon.discount_value, 10);
    }

    #[test]
    fn test_cart_quantity_of() {
        let product = Product {
            id: "p1".to_string(),
            name: "Product 1".to_string(),
            price: Money::from_minor(10000),
            stock: 20,
            discounts: vec![],
            description: None,
        };
        let cart = Cart {
            lines: vec![CartLine::new(product, 3)],
        };
        assert_eq!(cart.quantity_of("p1"), 3);
        assert_eq!(cart.quantity_of("p2"), 0);
        assert_eq!(cart.lines[0].gross().minor(), 30000);
    }
}
