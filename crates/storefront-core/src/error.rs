//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Rejected cart / coupon / catalog mutations     │
//! │  └── ValidationError  - Admin input validation failures                │
//! │                                                                         │
//! │  storefront-app errors (app crate)                                     │
//! │  ├── PersistError     - Snapshot load/save failures                    │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI toast               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Predicates vs Errors
//! The engine's predicates (`can_increment`, `can_set_quantity`,
//! `is_coupon_applicable`) return plain booleans. Only the value-returning
//! mutations in [`crate::cart`], [`crate::coupon`] and [`crate::catalog`]
//! turn a failed predicate into a `CoreError`, and they never hand back a
//! partially applied value.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Rejected business operations.
///
/// The caller maps these to user-facing messages; the input cart, catalog or
/// coupon selection is always left unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Product id does not exist in the catalog (or in the cart).
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Coupon code does not exist in the coupon catalog.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Adding or setting a quantity would exceed the product's stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Add to cart" (stock 20, already 20 in cart)
    ///      │
    ///      ▼
    /// remaining_stock = 0 → can_increment = false
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "p1", available: 0, requested: 1 }
    ///      │
    ///      ▼
    /// UI shows: "Not enough stock"
    /// ```
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Coupon fails its eligibility gate for the current subtotal.
    #[error("Coupon {code} requires a subtotal of at least {minimum} (current {subtotal})")]
    CouponNotApplicable {
        code: String,
        subtotal: i64,
        minimum: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for catalog-management operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., duplicate coupon code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
