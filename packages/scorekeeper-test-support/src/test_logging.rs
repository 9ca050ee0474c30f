//! Unified test logging initialization
//!
//! Integration test binaries cannot reach the crate's `#[cfg(test)]` modules,
//! so they call this initializer instead (usually from a `ctor` hook in
//! `tests/support`).

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The level is read from `TEST_LOG`, then
/// `RUST_LOG`, then falls back to `"warn"`.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // Critical for cargo/nextest capture
            .without_time()
            .try_init()
            .ok(); // Never panic if something else already initialized
    });
}
