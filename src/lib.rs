pub mod analytics;
pub mod api;
pub mod client;
pub mod config;
pub mod dataset;
pub mod db;
pub mod models;
pub mod report;
pub mod session;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from `RUST_LOG`, falling back to the built-in filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
