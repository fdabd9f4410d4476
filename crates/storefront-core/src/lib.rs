//! # storefront-core: Pricing & Stock-Reconciliation Engine
//!
//! Pure functions that turn a cart, a catalog and an optional coupon into
//! line discounts, totals, coupon eligibility and remaining stock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser UI                                   │   │
//! │  │    Catalog ──► Cart ──► Coupon picker ──► Order    Admin panel  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-app (state + commands)               │   │
//! │  │    add_to_cart, apply_coupon, complete_order, add_product ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌────────┐ ┌──────────┐  │   │
//! │  │  │ catalog │ │ pricing │ │ coupon  │ │  cart  │ │validation│  │   │
//! │  │  │ lookup  │ │ rates   │ │ gate    │ │ guarded│ │ admin    │  │   │
//! │  │  │ stock   │ │ totals  │ │ apply   │ │ edits  │ │ inputs   │  │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └────────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO HIDDEN STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, DiscountTier, CartLine, Cart, Coupon, CartTotals
//! - [`money`] - Money type with integer arithmetic and half-up rounding
//! - [`catalog`] - Product/coupon lookup, remaining stock, stock guard
//! - [`pricing`] - Line discount resolver, line totals, cart aggregation
//! - [`coupon`] - Coupon eligibility, application and selection
//! - [`cart`] - Guarded cart mutations returning new carts
//! - [`validation`] - Admin input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, inputs borrowed immutably
//! 2. **Integer Money**: amounts in the smallest currency unit, rates in bps
//! 3. **Round Per Line**: line totals are rounded before they are summed
//! 4. **Recompute Everything**: totals are never cached
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::add_to_cart;
//! use storefront_core::pricing::cart_totals;
//! use storefront_core::{Cart, DiscountRate, DiscountTier, Money, Product};
//!
//! let product = Product {
//!     id: "p1".into(),
//!     name: "Product 1".into(),
//!     price: Money::from_minor(10000),
//!     stock: 20,
//!     discounts: vec![DiscountTier::new(2, DiscountRate::from_bps(1000))],
//!     description: None,
//! };
//!
//! let cart = add_to_cart(&Cart::new(), &product).unwrap();
//! let cart = add_to_cart(&cart, &product).unwrap();
//!
//! let totals = cart_totals(&cart, None);
//! assert_eq!(totals.total_before_discount.minor(), 20000);
//! assert_eq!(totals.total_after_discount.minor(), 18000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Business Constants
// =============================================================================

/// A line at or above this quantity unlocks the bulk bonus for the whole cart.
pub const BULK_PURCHASE_THRESHOLD: i64 = 10;

/// Extra rate added to every line once the bulk bonus is active (5%).
pub const BULK_PURCHASE_BONUS: DiscountRate = DiscountRate::from_bps(500);

/// Absolute cap on a line's rate, applied after the bulk bonus (50%).
pub const MAX_LINE_DISCOUNT: DiscountRate = DiscountRate::from_bps(5000);

/// Minimum subtotal (after line discounts) for percentage coupons.
pub const PERCENTAGE_COUPON_MIN_SUBTOTAL: Money = Money::from_minor(10000);

/// Remaining stock at or below this shows a "low stock" badge.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Highest stock level the admin panel accepts.
pub const MAX_STOCK: i64 = 9999;

/// Highest unit price the admin panel accepts.
///
/// `MAX_PRICE × MAX_STOCK` is about 10^13, so line and cart totals of a
/// validated catalog stay far inside `i64`.
pub const MAX_PRICE: Money = Money::from_minor(1_000_000_000);

/// Highest fixed-amount coupon value the admin panel accepts.
pub const MAX_COUPON_AMOUNT: i64 = 100_000;

/// Maximum length of names and coupon codes.
pub const MAX_NAME_LENGTH: usize = 100;
