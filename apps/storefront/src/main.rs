//! # Storefront
//!
//! Entry point for the storefront command bridge.
//!
//! Reads one JSON request per line on stdin and writes one JSON response per
//! line on stdout. Logs go to stderr.
//!
//! ```bash
//! echo '{"cmd":"list_products","args":{}}' | cargo run -p storefront-app
//! ```

fn main() {
    if let Err(e) = storefront_app::run() {
        tracing::error!(error = %e, "Storefront exited with an error");
        eprintln!("storefront: {e}");
        std::process::exit(1);
    }
}
