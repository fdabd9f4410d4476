//! # Storefront Library
//!
//! Application shell for the storefront: owns catalog, cart and coupon
//! state, exposes shop and admin commands, and persists everything as a JSON
//! snapshot. All pricing decisions are delegated to `storefront-core`.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (startup, logging, bridge loop)
//! ├── seed.rs         ◄─── Catalog a fresh store starts with
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Products + coupons, admin CRUD
//! │   ├── cart.rs     ◄─── Cart + selected coupon
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── persist.rs  ◄─── JSON snapshot store
//! ├── commands/
//! │   ├── mod.rs      ◄─── AppState, request routing
//! │   ├── shop.rs     ◄─── Shopper-facing commands
//! │   └── admin.rs    ◄─── Admin commands
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## The Bridge
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI process                          storefront binary                  │
//! │  ──────────                          ─────────────────                  │
//! │                                                                         │
//! │  stdin  ── {"cmd":"get_cart"}\n ───► handle_line ──► dispatch           │
//! │  stdout ◄── {"ok":true,"data":{}}\n ◄─┘                                 │
//! │                                                                         │
//! │  stderr ◄── tracing logs                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod seed;
pub mod state;

use std::io::{self, BufRead, Write};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::{handle_line, AppState};
use state::ConfigState;

/// Runs the storefront bridge on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,storefront=debug; override with RUST_LOG            │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • STOREFRONT_* environment variables over defaults                  │
/// │                                                                         │
/// │  3. Restore State ────────────────────────────────────────────────────► │
/// │     • Snapshot file when present, seed catalog otherwise                │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • One request per stdin line until EOF                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ConfigState::from_env()?;
    info!(store = %config.store_name, persist = config.persist, "Starting storefront");

    let state = AppState::load(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(stdin.lock(), stdout.lock(), &state)?;

    info!("Input closed; shutting down");
    Ok(())
}

/// Reads requests line by line and writes one JSON response per line.
///
/// Blank lines are skipped. Stops at end of input.
pub fn serve<R, W>(reader: R, mut writer: W, state: &AppState) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(state, &line);
        debug!(ok = response.ok, "Request handled");

        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for storefront crates only
/// - Default: `info,storefront=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
