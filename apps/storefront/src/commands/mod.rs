//! # Commands Module
//!
//! All commands exposed to the storefront UI.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (AppState, request routing, envelope)
//! ├── shop.rs     ◄─── Catalog browsing, cart, coupon, checkout
//! └── admin.rs    ◄─── Product, discount tier and coupon management
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI                                                                     │
//! │  ──                                                                     │
//! │  {"cmd":"add_to_cart","args":{"productId":"p1"}}                        │
//! │         │                                                               │
//! │         │ (one JSON object per line)                                    │
//! │         ▼                                                               │
//! │  Request::AddToCart { product_id } ──► dispatch() ──► shop::add_to_cart │
//! │         │                                                               │
//! │         │ lock catalog → lock cart → core fn → swap value → unlock      │
//! │         │ persist snapshot                                              │
//! │         ▼                                                               │
//! │  {"ok":true,"data":{...CartView...}}                                    │
//! │  {"ok":false,"error":{"code":"INSUFFICIENT_STOCK","message":"..."}}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are plain functions taking `&AppState`, so tests and other hosts
//! call them directly without going through JSON.

pub mod admin;
pub mod shop;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_core::{CoreError, Coupon, DiscountTier};
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::seed::seed_catalog;
use crate::state::{
    CartSession, CartState, Catalog, CatalogState, ConfigState, ProductDraft, ProductPatch,
    Snapshot, SnapshotStore,
};

/// Everything a command can touch.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: CatalogState,
    pub cart: CartState,
    pub config: ConfigState,
    store: Option<SnapshotStore>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        session: CartSession,
        config: ConfigState,
        store: Option<SnapshotStore>,
    ) -> Self {
        AppState {
            catalog: CatalogState::new(catalog),
            cart: CartState::from_session(session),
            config,
            store,
        }
    }

    /// Seed catalog, empty cart, nothing written to disk.
    pub fn in_memory(config: ConfigState) -> Self {
        AppState::new(seed_catalog(), CartSession::new(), config, None)
    }

    /// Builds state from configuration, restoring the snapshot when
    /// persistence is on.
    ///
    /// A missing snapshot starts from seed data. So does a corrupt one; the
    /// next successful save replaces it.
    pub fn load(config: ConfigState) -> Self {
        let Some(path) = config.data_path.clone().filter(|_| config.persist) else {
            info!("Persistence disabled; starting from seed data");
            return AppState::in_memory(config);
        };

        let store = SnapshotStore::new(path);
        let (catalog, session) = match store.load() {
            Ok(Some(snapshot)) => {
                info!(path = ?store.path(), "Restored storefront snapshot");
                snapshot.restore()
            }
            Ok(None) => {
                info!(path = ?store.path(), "No snapshot yet; starting from seed data");
                (seed_catalog(), CartSession::new())
            }
            Err(e) => {
                error!(error = %e, "Could not restore snapshot; starting from seed data");
                (seed_catalog(), CartSession::new())
            }
        };

        AppState::new(catalog, session, config, Some(store))
    }

    /// Writes the current state to the snapshot file, if persistence is on.
    ///
    /// Must be called with no state lock held.
    pub(crate) fn persist(&self) -> Result<(), ApiError> {
        let Some(store) = &self.store else {
            return Ok(());
        };

        let snapshot = self
            .catalog
            .with_catalog(|catalog| self.cart.with_session(|s| Snapshot::capture(catalog, s)));
        store.save(&snapshot)?;
        Ok(())
    }
}

/// Logs a rejected mutation and converts it for the UI.
pub(crate) fn reject(command: &'static str) -> impl Fn(CoreError) -> ApiError {
    move |err| {
        warn!(command, error = %err, "Command rejected");
        ApiError::from(err)
    }
}

// =============================================================================
// Bridge protocol
// =============================================================================

/// One bridge request: `{"cmd": "<name>", "args": {...}}`.
///
/// Argument names are camelCase, as the browser UI sends them.
#[derive(Debug, Clone, Deserialize)]
#[serde(
    tag = "cmd",
    content = "args",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    // Shop
    ListProducts {
        #[serde(default)]
        query: Option<String>,
    },
    GetCart,
    AddToCart {
        product_id: String,
    },
    UpdateCartItem {
        product_id: String,
        quantity: i64,
    },
    RemoveFromCart {
        product_id: String,
    },
    ApplyCoupon {
        code: String,
    },
    ClearCoupon,
    CompleteOrder,

    // Admin
    AddProduct {
        product: ProductDraft,
    },
    UpdateProduct {
        product_id: String,
        patch: ProductPatch,
    },
    DeleteProduct {
        product_id: String,
    },
    AddDiscountTier {
        product_id: String,
        tier: DiscountTier,
    },
    RemoveDiscountTier {
        product_id: String,
        index: usize,
    },
    ListCoupons,
    AddCoupon {
        coupon: Coupon,
    },
    DeleteCoupon {
        code: String,
    },
}

/// Routes a request to its command and serializes the result.
pub fn dispatch(state: &AppState, request: Request) -> Result<Value, ApiError> {
    match request {
        Request::ListProducts { query } => to_json(shop::list_products(state, query.as_deref())),
        Request::GetCart => to_json(shop::get_cart(state)),
        Request::AddToCart { product_id } => to_json(shop::add_to_cart(state, &product_id)?),
        Request::UpdateCartItem {
            product_id,
            quantity,
        } => to_json(shop::update_cart_item(state, &product_id, quantity)?),
        Request::RemoveFromCart { product_id } => {
            to_json(shop::remove_from_cart(state, &product_id)?)
        }
        Request::ApplyCoupon { code } => to_json(shop::apply_coupon(state, &code)?),
        Request::ClearCoupon => to_json(shop::clear_coupon(state)?),
        Request::CompleteOrder => to_json(shop::complete_order(state)?),

        Request::AddProduct { product } => to_json(admin::add_product(state, product)?),
        Request::UpdateProduct { product_id, patch } => {
            to_json(admin::update_product(state, &product_id, patch)?)
        }
        Request::DeleteProduct { product_id } => {
            to_json(admin::delete_product(state, &product_id)?)
        }
        Request::AddDiscountTier { product_id, tier } => {
            to_json(admin::add_discount_tier(state, &product_id, tier)?)
        }
        Request::RemoveDiscountTier { product_id, index } => {
            to_json(admin::remove_discount_tier(state, &product_id, index)?)
        }
        Request::ListCoupons => to_json(admin::list_coupons(state)),
        Request::AddCoupon { coupon } => to_json(admin::add_coupon(state, coupon)?),
        Request::DeleteCoupon { code } => to_json(admin::delete_coupon(state, &code)?),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Response envelope written back for every request line.
///
/// ```json
/// {"ok": true, "data": {...}}
/// {"ok": false, "error": {"code": "NOT_FOUND", "message": "Product not found: p9"}}
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<Value, ApiError>> for Response {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Response {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Response {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

/// Parses and runs one request line.
pub fn handle_line(state: &AppState, line: &str) -> Response {
    let result = serde_json::from_str::<Request>(line)
        .map_err(|e| ApiError::invalid_request(e.to_string()))
        .and_then(|request| dispatch(state, request));
    Response::from(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn state() -> AppState {
        AppState::in_memory(ConfigState::default())
    }

    #[test]
    fn test_request_parsing() {
        let request: Request = serde_json::from_value(json!({
            "cmd": "update_cart_item",
            "args": { "productId": "p1", "quantity": 3 }
        }))
        .unwrap();
        assert!(matches!(
            request,
            Request::UpdateCartItem { ref product_id, quantity: 3 } if product_id == "p1"
        ));

        let request: Request = serde_json::from_value(json!({ "cmd": "get_cart" })).unwrap();
        assert!(matches!(request, Request::GetCart));
    }

    #[test]
    fn test_handle_line_success() {
        let state = state();
        let response = handle_line(&state, r#"{"cmd":"add_to_cart","args":{"productId":"p1"}}"#);

        assert!(response.ok);
        let data = response.data.unwrap();
        assert_eq!(data["itemCount"], 1);
        assert_eq!(data["lines"][0]["productId"], "p1");
    }

    #[test]
    fn test_handle_line_errors() {
        let state = state();

        let response = handle_line(&state, "not json");
        assert!(!response.ok);
        assert_eq!(response.error.unwrap().code, ErrorCode::InvalidRequest);

        let response = handle_line(&state, r#"{"cmd":"add_to_cart","args":{"productId":"p9"}}"#);
        assert_eq!(response.error.unwrap().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_response_envelope_shape() {
        let ok = serde_json::to_value(Response::from(Ok(json!(1)))).unwrap();
        assert_eq!(ok, json!({ "ok": true, "data": 1 }));

        let err = serde_json::to_value(Response::from(Err(ApiError::internal("boom")))).unwrap();
        assert_eq!(
            err,
            json!({ "ok": false, "error": { "code": "INTERNAL", "message": "boom" } })
        );
    }

    #[test]
    fn test_persisting_state_survives_reload() {
        let path = std::env::temp_dir().join(format!("storefront-{}.json", uuid::Uuid::new_v4()));
        let config = ConfigState {
            persist: true,
            data_path: Some(path.clone()),
            ..ConfigState::default()
        };

        let state = AppState::load(config.clone());
        shop::add_to_cart(&state, "p2").unwrap();
        shop::apply_coupon(&state, "PERCENT10").unwrap();

        let reloaded = AppState::load(config);
        let cart = shop::get_cart(&reloaded);
        assert_eq!(cart.item_count, 1);
        assert_eq!(cart.selected_coupon.map(|c| c.code), Some("PERCENT10".to_string()));

        std::fs::remove_file(path).unwrap();
    }
}
