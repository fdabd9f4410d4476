//! # State Module
//!
//! Application state for the storefront shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐   │
//! │  │ CatalogState │  │  CartState   │  │ ConfigState  │  │ Snapshot-  │   │
//! │  │              │  │              │  │              │  │ Store      │   │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  store name  │  │            │   │
//! │  │    Catalog   │  │  CartSession │  │  currency    │  │  JSON file │   │
//! │  │  >>          │  │  >>          │  │  data path   │  │            │   │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘   │
//! │                                                                         │
//! │  LOCK ORDER: catalog before cart, never the reverse.                    │
//! │  ConfigState is read-only after initialization.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod persist;

pub use cart::{CartSession, CartState};
pub use catalog::{Catalog, CatalogState, ProductDraft, ProductPatch};
pub use config::{ConfigError, ConfigState};
pub use persist::{PersistError, Snapshot, SnapshotStore};
