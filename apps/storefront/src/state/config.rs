//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Defaults (this file)
//!
//! Pricing rules are deliberately absent: the bulk threshold, bonus and
//! coupon minimum are business constants in `storefront-core`.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use storefront_core::Money;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shown in the header and on receipts)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Whether the symbol follows the amount (`10,000원`) or precedes it
    pub symbol_after_amount: bool,

    /// Persist state to `data_path` after every mutation
    pub persist: bool,

    /// Snapshot file location
    pub data_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// Development defaults: single-currency display, persistence off.
    fn default() -> Self {
        ConfigState {
            store_name: "Storefront".to_string(),
            currency_symbol: "원".to_string(),
            symbol_after_amount: true,
            persist: false,
            data_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_STORE_NAME`: Override store name
    /// - `STOREFRONT_CURRENCY_SYMBOL`: Override currency symbol
    /// - `STOREFRONT_SYMBOL_AFTER`: `true`/`false`, symbol position
    /// - `STOREFRONT_PERSIST`: `true`/`false` (default `true`)
    /// - `STOREFRONT_DATA_PATH`: Snapshot file; defaults to the platform data dir
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = ConfigState::default();

        if let Ok(store_name) = env::var("STOREFRONT_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(symbol) = env::var("STOREFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config.symbol_after_amount = parse_bool("STOREFRONT_SYMBOL_AFTER", true)?;
        config.persist = parse_bool("STOREFRONT_PERSIST", true)?;

        if config.persist {
            let path = match env::var("STOREFRONT_DATA_PATH") {
                Ok(path) => PathBuf::from(path),
                Err(_) => default_data_path()
                    .ok_or_else(|| ConfigError::MissingRequired("STOREFRONT_DATA_PATH".to_string()))?,
            };
            config.data_path = Some(path);
        }

        Ok(config)
    }

    /// Formats money with grouped digits and the currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_app::state::ConfigState;
    /// use storefront_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_minor(135000)), "135,000원");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if self.symbol_after_amount {
            format!("{}{}", amount, self.currency_symbol)
        } else if amount.is_negative() {
            format!("-{}{}", self.currency_symbol, Money::zero() - amount)
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

/// Platform data directory for the snapshot file.
///
/// - **macOS**: `~/Library/Application Support/com.storefront.shop/storefront.json`
/// - **Windows**: `%APPDATA%\storefront\shop\data\storefront.json`
/// - **Linux**: `~/.local/share/shop/storefront.json`
fn default_data_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "storefront", "shop").map(|dirs| dirs.data_dir().join("storefront.json"))
}

fn parse_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
