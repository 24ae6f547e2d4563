//! Tracing subscriber setup for hosts and tests.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "flowcanvas=info";

/// Installs a fmt subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already installed; calling
/// this more than once is harmless.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
