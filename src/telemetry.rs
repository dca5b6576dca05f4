//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default directives when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "resource_api=info,resource_server=info,tower_http=info";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .init();
}
