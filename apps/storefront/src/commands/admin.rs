//! # Admin Commands
//!
//! Catalog management behind the admin page.
//!
//! Catalog edits ripple into the cart:
//! ```text
//! update_product / tier change ──► cart line refreshed, clamped to new stock
//! delete_product ────────────────► cart line removed
//! delete_coupon ─────────────────► selection cleared if it was that coupon
//!                  └──► coupon selection reconciled in every case
//! ```

use storefront_core::cart::{remove_from_cart, sync_product};
use storefront_core::{CoreError, Coupon, DiscountTier, Product};
use tracing::{debug, info};

use super::{reject, AppState};
use crate::error::ApiError;
use crate::state::{Catalog, ProductDraft, ProductPatch};

/// Refreshes the cart line for an edited product. Call with the catalog lock
/// held.
fn sync_cart_line(state: &AppState, catalog: &Catalog, product: &Product) {
    state.cart.with_session_mut(|s| {
        let next = sync_product(&s.cart, product);
        if s.replace_cart(next, &catalog.coupons) {
            info!("Selected coupon no longer applies; cleared");
        }
    });
}

// =============================================================================
// Products
// =============================================================================

pub fn add_product(state: &AppState, draft: ProductDraft) -> Result<Product, ApiError> {
    debug!(name = %draft.name, "add_product command");

    let product = state
        .catalog
        .with_catalog_mut(|catalog| catalog.add_product(draft))
        .map_err(reject("add_product"))?;

    info!(product_id = %product.id, name = %product.name, "Product added");
    state.persist()?;
    Ok(product)
}

/// Applies a partial edit. Reducing stock below the carted quantity clamps
/// the cart line.
pub fn update_product(
    state: &AppState,
    product_id: &str,
    patch: ProductPatch,
) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, ?patch, "update_product command");

    let product = state
        .catalog
        .with_catalog_mut(|catalog| {
            let updated = catalog.update_product(product_id, patch)?;
            sync_cart_line(state, catalog, &updated);
            Ok::<_, CoreError>(updated)
        })
        .map_err(reject("update_product"))?;

    info!(product_id = %product.id, "Product updated");
    state.persist()?;
    Ok(product)
}

pub fn delete_product(state: &AppState, product_id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "delete_product command");

    let product = state
        .catalog
        .with_catalog_mut(|catalog| {
            let removed = catalog.delete_product(product_id)?;
            state.cart.with_session_mut(|s| {
                let next = remove_from_cart(&s.cart, &removed.id);
                if s.replace_cart(next, &catalog.coupons) {
                    info!("Selected coupon no longer applies; cleared");
                }
            });
            Ok::<_, CoreError>(removed)
        })
        .map_err(reject("delete_product"))?;

    info!(product_id = %product.id, "Product deleted");
    state.persist()?;
    Ok(product)
}

pub fn add_discount_tier(
    state: &AppState,
    product_id: &str,
    tier: DiscountTier,
) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, quantity = tier.quantity, "add_discount_tier command");

    let product = state
        .catalog
        .with_catalog_mut(|catalog| {
            let updated = catalog.add_discount_tier(product_id, tier)?;
            sync_cart_line(state, catalog, &updated);
            Ok::<_, CoreError>(updated)
        })
        .map_err(reject("add_discount_tier"))?;

    state.persist()?;
    Ok(product)
}

pub fn remove_discount_tier(
    state: &AppState,
    product_id: &str,
    index: usize,
) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, index, "remove_discount_tier command");

    let product = state
        .catalog
        .with_catalog_mut(|catalog| {
            let updated = catalog.remove_discount_tier(product_id, index)?;
            sync_cart_line(state, catalog, &updated);
            Ok::<_, CoreError>(updated)
        })
        .map_err(reject("remove_discount_tier"))?;

    state.persist()?;
    Ok(product)
}

// =============================================================================
// Coupons
// =============================================================================

pub fn list_coupons(state: &AppState) -> Vec<Coupon> {
    debug!("list_coupons command");
    state.catalog.with_catalog(|catalog| catalog.coupons.clone())
}

pub fn add_coupon(state: &AppState, coupon: Coupon) -> Result<Coupon, ApiError> {
    debug!(code = %coupon.code, "add_coupon command");

    let coupon = state
        .catalog
        .with_catalog_mut(|catalog| catalog.add_coupon(coupon))
        .map_err(reject("add_coupon"))?;

    info!(code = %coupon.code, "Coupon added");
    state.persist()?;
    Ok(coupon)
}

/// Deletes a coupon; a selection pointing at it is cleared.
pub fn delete_coupon(state: &AppState, code: &str) -> Result<Coupon, ApiError> {
    debug!(code = %code, "delete_coupon command");

    let coupon = state
        .catalog
        .with_catalog_mut(|catalog| {
            let removed = catalog.delete_coupon(code)?;
            state.cart.with_session_mut(|s| {
                if s.reconcile(&catalog.coupons) {
                    info!(code = %removed.code, "Deleted coupon was selected; cleared");
                }
            });
            Ok::<_, CoreError>(removed)
        })
        .map_err(reject("delete_coupon"))?;

    info!(code = %coupon.code, "Coupon deleted");
    state.persist()?;
    Ok(coupon)
}
