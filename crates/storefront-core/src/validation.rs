//! # Validation Module
//!
//! Input validation for catalog-management operations (the admin panel).
//!
//! ## Why Here?
//! The pricing functions assume non-negative prices, quantities and stock and
//! never clamp. This module is what keeps such values out of the catalog in
//! the first place.
//!
//! ```text
//! Admin form ──► validate_product / validate_coupon ──► catalog state
//!                      │
//!                      └── Err(ValidationError) ──► form error, no change
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_price, validate_stock};
//! use storefront_core::Money;
//!
//! assert!(validate_price(Money::from_minor(10000)).is_ok());
//! assert!(validate_stock(10_000).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Coupon, DiscountTier, DiscountType, Product};
use crate::{MAX_COUPON_AMOUNT, MAX_LINE_DISCOUNT, MAX_NAME_LENGTH, MAX_PRICE, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required display string (product or coupon name, coupon code).
fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required("name", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price: `0..=MAX_PRICE`. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE.minor(),
        });
    }

    Ok(())
}

/// Validates a stock level: `0..=MAX_STOCK`.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK).contains(&stock) {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

/// Validates a discount tier: positive threshold, rate at most
/// [`MAX_LINE_DISCOUNT`] (50%).
pub fn validate_discount_tier(tier: &DiscountTier) -> ValidationResult<()> {
    if tier.quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "discount quantity".to_string(),
        });
    }

    if tier.rate > MAX_LINE_DISCOUNT {
        return Err(ValidationError::OutOfRange {
            field: "discount rate".to_string(),
            min: 0,
            max: MAX_LINE_DISCOUNT.whole_percent() as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates every field of a product before it enters the catalog.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    validate_stock(product.stock)?;
    product.discounts.iter().try_for_each(validate_discount_tier)
}

/// Validates a new coupon against the existing coupon catalog.
///
/// ## Rules
/// - name and code required
/// - code unique (case-sensitive)
/// - percentage value `0..=100`
/// - amount value `0..=MAX_COUPON_AMOUNT`
pub fn validate_coupon(coupon: &Coupon, existing: &[Coupon]) -> ValidationResult<()> {
    validate_required("coupon name", &coupon.name)?;
    validate_required("coupon code", &coupon.code)?;

    if existing.iter().any(|c| c.code == coupon.code) {
        return Err(ValidationError::Duplicate {
            field: "coupon code".to_string(),
            value: coupon.code.clone(),
        });
    }

    let max = match coupon.discount_type {
        DiscountType::Percentage => 100,
        DiscountType::Amount => MAX_COUPON_AMOUNT,
    };
    if !(0..=max).contains(&coupon.discount_value) {
        return Err(ValidationError::OutOfRange {
            field: "discount value".to_string(),
            min: 0,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{amount_coupon, coupons, percent_coupon, product, tiered_product};

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Product 1").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_price_and_stock() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_minor(-1)).is_err());
        assert!(validate_price(MAX_PRICE).is_ok());
        assert!(validate_price(Money::from_minor(MAX_PRICE.minor() + 1)).is_err());
        assert!(validate_price(Money::from_minor(i64::MAX / 2)).is_err());

        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(MAX_STOCK).is_ok());
        assert!(validate_stock(MAX_STOCK + 1).is_err());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&tiered_product("p1", 10000, 20, &[(10, 1000)])).is_ok());

        let mut p = product("p1", 10000, 20);
        p.stock = -3;
        assert_eq!(
            validate_product(&p),
            Err(ValidationError::OutOfRange {
                field: "stock".to_string(),
                min: 0,
                max: MAX_STOCK,
            })
        );

        assert!(validate_product(&tiered_product("p1", 10000, 20, &[(0, 1000)])).is_err());
        assert!(validate_product(&tiered_product("p1", 10000, 20, &[(5, 10_000)])).is_err());
    }

    #[test]
    fn test_tier_rate_limited_to_line_cap() {
        assert!(validate_product(&tiered_product("p1", 10000, 20, &[(1, 5000)])).is_ok());
        assert_eq!(
            validate_product(&tiered_product("p1", 10000, 20, &[(1, 6000)])),
            Err(ValidationError::OutOfRange {
                field: "discount rate".to_string(),
                min: 0,
                max: 50,
            })
        );
    }

    #[test]
    fn test_validate_coupon() {
        let existing = coupons();

        assert!(validate_coupon(&percent_coupon("PERCENT20", 20), &existing).is_ok());
        assert!(validate_coupon(&percent_coupon("PERCENT101", 101), &existing).is_err());
        assert!(validate_coupon(&amount_coupon("BIG", MAX_COUPON_AMOUNT + 1), &existing).is_err());
        assert!(validate_coupon(&amount_coupon("NEG", -1), &existing).is_err());
        assert!(validate_coupon(&amount_coupon("  ", 1000), &existing).is_err());

        assert_eq!(
            validate_coupon(&amount_coupon("AMOUNT5000", 5000), &existing),
            Err(ValidationError::Duplicate {
                field: "coupon code".to_string(),
                value: "AMOUNT5000".to_string(),
            })
        );
    }
}
