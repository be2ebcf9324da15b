pub mod auth;
pub mod config;
pub mod error;
pub mod estimate;
pub mod handlers;
pub mod lead;
pub mod metrics;
pub mod pricing;
pub mod server;
pub mod signals;
pub mod store;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging with the default level and text output
pub fn init_tracing() {
    init_tracing_with("info", "text");
}

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over `level`. `format` is "json" or "text".
/// Can only be called once per process.
pub fn init_tracing_with(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
