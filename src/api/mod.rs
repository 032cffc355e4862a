//! HTTP query API.
//!
//! Exposes the patient store over HTTP for external consumers and for
//! the dataset loader's API-pull mode. The router is composable —
//! `api_router()` returns a `Router` that can be mounted on any axum
//! server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer};
pub use types::ApiContext;
