//! # Catalog State
//!
//! Products and coupons, plus the admin-panel operations that change them.
//!
//! ## Admin Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin form                Catalog method          Guard                │
//! │  ──────────                ──────────────          ─────                │
//! │  New product ────────────► add_product ──────────► validate_product     │
//! │  Edit price/stock/name ──► update_product ───────► validate_product     │
//! │  Add/remove tier ────────► add/remove_discount_tier                     │
//! │  Delete product ─────────► delete_product                               │
//! │  New coupon ─────────────► add_coupon ───────────► validate_coupon      │
//! │  Delete coupon ──────────► delete_coupon                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every change is all-or-nothing: the edited product is built and validated
//! on the side, and only swapped in once it passes.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use storefront_core::catalog::{find_coupon, find_product};
use storefront_core::validation::{validate_coupon, validate_discount_tier, validate_product};
use storefront_core::{
    CoreError, CoreResult, Coupon, DiscountTier, Money, Product, ValidationError,
};
use uuid::Uuid;

/// Fields for a new product. The id is generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    #[serde(default)]
    pub discounts: Vec<DiscountTier>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial product edit; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
    pub description: Option<String>,
    pub discounts: Option<Vec<DiscountTier>>,
}

/// The in-memory catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub coupons: Vec<Coupon>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, coupons: Vec<Coupon>) -> Self {
        Catalog { products, coupons }
    }

    /// Looks up a product, mapping a miss to `ProductNotFound`.
    pub fn product(&self, id: &str) -> CoreResult<&Product> {
        find_product(&self.products, id).ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Looks up a coupon, mapping a miss to `CouponNotFound`.
    pub fn coupon(&self, code: &str) -> CoreResult<&Coupon> {
        find_coupon(&self.coupons, code).ok_or_else(|| CoreError::CouponNotFound(code.to_string()))
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Validates and appends a new product with a fresh id.
    pub fn add_product(&mut self, draft: ProductDraft) -> CoreResult<Product> {
        let product = Product {
            id: format!("p-{}", Uuid::new_v4()),
            name: draft.name.trim().to_string(),
            price: draft.price,
            stock: draft.stock,
            discounts: draft.discounts,
            description: draft.description,
        };
        validate_product(&product)?;

        self.products.push(product.clone());
        Ok(product)
    }

    /// Applies a patch, returning the updated product.
    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> CoreResult<Product> {
        let mut updated = self.product(id)?.clone();

        if let Some(name) = patch.name {
            updated.name = name.trim().to_string();
        }
        if let Some(price) = patch.price {
            updated.price = price;
        }
        if let Some(stock) = patch.stock {
            updated.stock = stock;
        }
        if let Some(description) = patch.description {
            updated.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(discounts) = patch.discounts {
            updated.discounts = discounts;
        }
        validate_product(&updated)?;

        self.replace_product(updated.clone());
        Ok(updated)
    }

    /// Appends a discount tier to a product.
    pub fn add_discount_tier(&mut self, id: &str, tier: DiscountTier) -> CoreResult<Product> {
        validate_discount_tier(&tier)?;

        let mut updated = self.product(id)?.clone();
        updated.discounts.push(tier);

        self.replace_product(updated.clone());
        Ok(updated)
    }

    /// Removes the tier at `index` from a product.
    pub fn remove_discount_tier(&mut self, id: &str, index: usize) -> CoreResult<Product> {
        let mut updated = self.product(id)?.clone();

        if index >= updated.discounts.len() {
            return Err(ValidationError::OutOfRange {
                field: "discount index".to_string(),
                min: 0,
                max: updated.discounts.len() as i64 - 1,
            }
            .into());
        }
        updated.discounts.remove(index);

        self.replace_product(updated.clone());
        Ok(updated)
    }

    /// Removes a product, returning it.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        Ok(self.products.remove(index))
    }

    fn replace_product(&mut self, product: Product) {
        if let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) {
            *slot = product;
        }
    }

    // -------------------------------------------------------------------------
    // Coupons
    // -------------------------------------------------------------------------

    /// Validates and appends a coupon (codes are unique).
    pub fn add_coupon(&mut self, coupon: Coupon) -> CoreResult<Coupon> {
        let coupon = Coupon {
            name: coupon.name.trim().to_string(),
            code: coupon.code.trim().to_string(),
            ..coupon
        };
        validate_coupon(&coupon, &self.coupons)?;

        self.coupons.push(coupon.clone());
        Ok(coupon)
    }

    /// Removes a coupon by code, returning it.
    pub fn delete_coupon(&mut self, code: &str) -> CoreResult<Coupon> {
        let index = self
            .coupons
            .iter()
            .position(|c| c.code == code)
            .ok_or_else(|| CoreError::CouponNotFound(code.to_string()))?;
        Ok(self.coupons.remove(index))
    }
}

/// Managed catalog state.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    catalog: Arc<Mutex<Catalog>>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    /// Executes a function with write access to the catalog.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut catalog)
    }
}
