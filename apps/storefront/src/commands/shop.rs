//! # Shop Commands
//!
//! Commands behind the shopper's page: product grid, cart panel, coupon
//! picker and checkout button.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐        │
//! │  │  Empty   │────►│ In Cart  │────►│  Coupon  │────►│  Order   │        │
//! │  │  Cart    │     │          │     │ Selected │     │ Complete │        │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘        │
//! │                        │                 │                │             │
//! │                   add_to_cart       apply_coupon    complete_order      │
//! │                   update_cart_item  clear_coupon          │             │
//! │                   remove_from_cart                        │             │
//! │                        ▲                                  │             │
//! │                        └──────── (back to empty) ◄────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any cart change re-checks the selected coupon; a percentage coupon whose
//! minimum is no longer met is dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_core::catalog::{remaining_stock, search_products, stock_status, StockStatus};
use storefront_core::coupon::select_coupon;
use storefront_core::pricing::{
    cart_totals, line_discount_percent, line_total, max_tier_rate, resolve_line_discount_rate,
    total_quantity,
};
use storefront_core::{cart, CartTotals, CoreError, Coupon, DiscountRate, Money, Product};
use tracing::{debug, info};

use super::{reject, AppState};
use crate::error::ApiError;
use crate::state::{CartSession, ConfigState};

// =============================================================================
// Views
// =============================================================================

/// A catalog card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,

    /// Stock minus what the cart already holds
    pub remaining_stock: i64,

    pub stock_status: StockStatus,

    /// Best tier rate, for the "up to N% off" badge
    pub max_discount_rate: DiscountRate,

    /// Formatted price, or "SOLD OUT"
    pub display_price: String,
}

impl ProductView {
    fn build(product: &Product, session: &CartSession, config: &ConfigState) -> Self {
        let status = stock_status(product, &session.cart);
        let display_price = match status {
            StockStatus::SoldOut => "SOLD OUT".to_string(),
            _ => config.format_currency(product.price),
        };

        ProductView {
            product: product.clone(),
            remaining_stock: remaining_stock(product, &session.cart),
            stock_status: status,
            max_discount_rate: max_tier_rate(product),
            display_price,
        }
    }
}

/// One row of the cart panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,

    /// Effective rate, bulk bonus included
    pub discount_rate: DiscountRate,

    /// Discount shown as a whole percent of the gross line price
    pub discount_percent: u32,

    pub line_total: Money,
    pub remaining_stock: i64,
}

/// The cart panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
    pub total_discount: Money,
    pub selected_coupon: Option<Coupon>,

    /// Sum of quantities (the badge on the cart icon)
    pub item_count: i64,

    pub created_at: DateTime<Utc>,
}

impl From<&CartSession> for CartView {
    fn from(session: &CartSession) -> Self {
        let cart = &session.cart;
        let totals = cart_totals(cart, session.selected_coupon.as_ref());

        let lines = cart
            .lines
            .iter()
            .map(|line| CartLineView {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                unit_price: line.product.price,
                quantity: line.quantity,
                discount_rate: resolve_line_discount_rate(line, cart),
                discount_percent: line_discount_percent(line, cart),
                line_total: line_total(line, cart),
                remaining_stock: remaining_stock(&line.product, cart),
            })
            .collect();

        CartView {
            lines,
            totals,
            total_discount: totals.total_discount(),
            selected_coupon: session.selected_coupon.clone(),
            item_count: total_quantity(cart),
            created_at: session.created_at,
        }
    }
}

/// Checkout confirmation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// `ORD-<epoch millis>`
    pub order_number: String,
    pub totals: CartTotals,
    pub item_count: i64,
    pub coupon_code: Option<String>,
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Lists products, optionally filtered by a name/description query.
pub fn list_products(state: &AppState, query: Option<&str>) -> Vec<ProductView> {
    debug!(query = ?query, "list_products command");

    state.catalog.with_catalog(|catalog| {
        state.cart.with_session(|session| {
            search_products(&catalog.products, query.unwrap_or(""))
                .into_iter()
                .map(|p| ProductView::build(p, session, &state.config))
                .collect()
        })
    })
}

// =============================================================================
// Cart
// =============================================================================

/// Gets the current cart with per-line pricing and totals.
pub fn get_cart(state: &AppState) -> CartView {
    debug!("get_cart command");
    state.cart.with_session(|s| CartView::from(s))
}

/// Adds one unit of a product.
///
/// ## Behavior
/// - Already in cart: quantity + 1, product snapshot refreshed
/// - Not in cart: new line with quantity 1
/// - No stock left: `INSUFFICIENT_STOCK`, cart unchanged
pub fn add_to_cart(state: &AppState, product_id: &str) -> Result<CartView, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let view = state
        .catalog
        .with_catalog(|catalog| {
            let product = catalog.product(product_id)?;
            state.cart.with_session_mut(|s| {
                let next = cart::add_to_cart(&s.cart, product)?;
                if s.replace_cart(next, &catalog.coupons) {
                    info!("Selected coupon no longer applies; cleared");
                }
                Ok::<_, CoreError>(CartView::from(&*s))
            })
        })
        .map_err(reject("add_to_cart"))?;

    state.persist()?;
    Ok(view)
}

/// Sets a line's quantity; zero or less removes the line.
pub fn update_cart_item(
    state: &AppState,
    product_id: &str,
    quantity: i64,
) -> Result<CartView, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let view = state
        .catalog
        .with_catalog(|catalog| {
            let product = catalog.product(product_id)?;
            state.cart.with_session_mut(|s| {
                let next = cart::update_quantity(&s.cart, product, quantity)?;
                if s.replace_cart(next, &catalog.coupons) {
                    info!("Selected coupon no longer applies; cleared");
                }
                Ok::<_, CoreError>(CartView::from(&*s))
            })
        })
        .map_err(reject("update_cart_item"))?;

    state.persist()?;
    Ok(view)
}

/// Removes a line. Unknown ids leave the cart unchanged.
pub fn remove_from_cart(state: &AppState, product_id: &str) -> Result<CartView, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    let view = state.catalog.with_catalog(|catalog| {
        state.cart.with_session_mut(|s| {
            let next = cart::remove_from_cart(&s.cart, product_id);
            if s.replace_cart(next, &catalog.coupons) {
                info!("Selected coupon no longer applies; cleared");
            }
            CartView::from(&*s)
        })
    });

    state.persist()?;
    Ok(view)
}

// =============================================================================
// Coupon
// =============================================================================

/// Selects a coupon by code.
///
/// ## Errors
/// - Unknown code: `NOT_FOUND`
/// - Empty cart: `VALIDATION_ERROR`
/// - Percentage coupon below the minimum subtotal: `COUPON_NOT_APPLICABLE`,
///   previous selection kept
pub fn apply_coupon(state: &AppState, code: &str) -> Result<CartView, ApiError> {
    debug!(code = %code, "apply_coupon command");

    let view = state.catalog.with_catalog(|catalog| -> Result<CartView, ApiError> {
        let coupon = catalog.coupon(code).map_err(reject("apply_coupon"))?;
        state.cart.with_session_mut(|s| {
            if s.cart.is_empty() {
                return Err(ApiError::validation("Add items to the cart before applying a coupon"));
            }
            let selected = select_coupon(coupon, &s.cart).map_err(reject("apply_coupon"))?;
            s.selected_coupon = Some(selected);
            Ok(CartView::from(&*s))
        })
    })?;

    state.persist()?;
    Ok(view)
}

/// Clears the coupon selection.
pub fn clear_coupon(state: &AppState) -> Result<CartView, ApiError> {
    debug!("clear_coupon command");

    let view = state.cart.with_session_mut(|s| {
        s.selected_coupon = None;
        CartView::from(&*s)
    });

    state.persist()?;
    Ok(view)
}

// =============================================================================
// Checkout
// =============================================================================

/// Completes the order: returns a receipt and resets the cart.
pub fn complete_order(state: &AppState) -> Result<OrderReceipt, ApiError> {
    debug!("complete_order command");

    let receipt = state.cart.with_session_mut(|s| -> Result<OrderReceipt, ApiError> {
        if s.cart.is_empty() {
            return Err(ApiError::validation("Cart is empty"));
        }

        let completed_at = Utc::now();
        let receipt = OrderReceipt {
            order_number: format!("ORD-{}", completed_at.timestamp_millis()),
            totals: cart_totals(&s.cart, s.selected_coupon.as_ref()),
            item_count: total_quantity(&s.cart),
            coupon_code: s.selected_coupon.as_ref().map(|c| c.code.clone()),
            completed_at,
        };
        s.reset();
        Ok(receipt)
    })?;

    info!(
        order_number = %receipt.order_number,
        total = %receipt.totals.total_after_discount,
        "Order completed"
    );

    state.persist()?;
    Ok(receipt)
}
