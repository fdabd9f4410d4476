//! # Snapshot Persistence
//!
//! Saves the catalog, cart and coupon selection as one JSON document and
//! restores it on startup, the way the browser build keeps them in local
//! storage.
//!
//! ```text
//! mutating command ──► Snapshot::capture ──► write tmp ──► rename over file
//! startup ───────────► SnapshotStore::load ──► None (no file) → seed data
//! ```
//!
//! The selected coupon is stored by code only; on restore it is resolved
//! against the restored coupon list and reconciled like any other selection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storefront_core::catalog::find_coupon;
use storefront_core::{Cart, Coupon, Product};

use super::cart::CartSession;
use super::catalog::Catalog;

/// Persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt snapshot {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// On-disk shape of the storefront state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub coupons: Vec<Coupon>,
    pub cart: Cart,
    #[serde(default)]
    pub selected_coupon_code: Option<String>,
}

impl Snapshot {
    pub fn capture(catalog: &Catalog, session: &CartSession) -> Self {
        Snapshot {
            products: catalog.products.clone(),
            coupons: catalog.coupons.clone(),
            cart: session.cart.clone(),
            selected_coupon_code: session.selected_coupon.as_ref().map(|c| c.code.clone()),
        }
    }

    /// Splits the snapshot back into catalog and session state.
    pub fn restore(self) -> (Catalog, CartSession) {
        let catalog = Catalog::new(self.products, self.coupons);

        let mut session = CartSession::new();
        session.cart = self.cart;
        session.selected_coupon = self
            .selected_coupon_code
            .as_deref()
            .and_then(|code| find_coupon(&catalog.coupons, code))
            .cloned();
        session.reconcile(&catalog.coupons);

        (catalog, session)
    }
}

/// Reads and writes the snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot; `Ok(None)` when no file exists yet.
    pub fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| PersistError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Writes the snapshot through a temp file so a crash never leaves a
    /// half-written document behind.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let io_err = |source| PersistError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}
