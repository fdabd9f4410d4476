//! # Cart State
//!
//! Holds the shopper's cart and selected coupon.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` so commands can be called from
//! any thread the host runs them on; only one command mutates it at a time.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action           Command               Session Change               │
//! │  ─────────           ───────               ──────────────               │
//! │                                                                         │
//! │  Add to cart ──────► add_to_cart() ──────► cart = core::add_to_cart    │
//! │  Change quantity ──► update_cart_item() ─► cart = core::update_quantity│
//! │  Remove ───────────► remove_from_cart() ─► cart = core::remove_...     │
//! │  Pick coupon ──────► apply_coupon() ─────► coupon = core::select_...   │
//! │  Place order ──────► complete_order() ───► session reset               │
//! │                                                                         │
//! │  After every cart change the coupon selection is reconciled.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::coupon::reconcile_selected_coupon;
use storefront_core::{Cart, Coupon};

/// The shopper's working state.
///
/// ## Invariants
/// - `selected_coupon` is either `None` or a coupon that exists in the
///   coupon catalog and is eligible for `cart` (see [`CartSession::reconcile`])
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSession {
    pub cart: Cart,

    pub selected_coupon: Option<Coupon>,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl CartSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        CartSession {
            cart: Cart::new(),
            selected_coupon: None,
            created_at: Utc::now(),
        }
    }

    /// Replaces the cart and re-checks the coupon selection against it.
    /// Returns `true` when the selection had to be dropped.
    pub fn replace_cart(&mut self, cart: Cart, coupons: &[Coupon]) -> bool {
        self.cart = cart;
        self.reconcile(coupons)
    }

    /// Drops the selected coupon if it is no longer valid for the cart.
    ///
    /// ## Returns
    /// `true` when a selection was cleared.
    pub fn reconcile(&mut self, coupons: &[Coupon]) -> bool {
        let next = reconcile_selected_coupon(self.selected_coupon.as_ref(), coupons, &self.cart);
        let cleared = self.selected_coupon.is_some() && next.is_none();
        self.selected_coupon = next;
        cleared
    }

    /// Empties the cart and clears the coupon (order completed).
    pub fn reset(&mut self) {
        *self = CartSession::new();
    }
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Managed cart state.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    session: Arc<Mutex<CartSession>>,
}

impl CartState {
    /// Wraps a restored session.
    pub fn from_session(session: CartSession) -> Self {
        CartState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_session(|s| cart_totals(&s.cart, s.selected_coupon.as_ref()));
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{seed_coupons, seed_products};
    use storefront_core::cart::add_to_cart;

    #[test]
    fn test_replace_cart_clears_ineligible_coupon() {
        let coupons = seed_coupons();
        let products = seed_products();
        let percent = coupons
            .iter()
            .find(|c| c.code == "PERCENT10")
            .cloned()
            .unwrap();

        let mut session = CartSession::new();
        session.cart = add_to_cart(&Cart::new(), &products[1]).unwrap(); // 20,000
        session.selected_coupon = Some(percent);

        // Still eligible
        assert!(!session.reconcile(&coupons));
        assert!(session.selected_coupon.is_some());

        // Empty cart clears the selection
        assert!(session.replace_cart(Cart::new(), &coupons));
        assert!(session.selected_coupon.is_none());
    }

    #[test]
    fn test_reset() {
        let products = seed_products();
        let state = CartState::default();

        state.with_session_mut(|s| {
            s.cart = add_to_cart(&s.cart, &products[0]).unwrap();
        });
        assert_eq!(state.with_session(|s| s.cart.lines.len()), 1);

        state.with_session_mut(CartSession::reset);
        assert!(state.with_session(|s| s.cart.is_empty()));
    }
}
