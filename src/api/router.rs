//! Route table for the query API.
//!
//! Returns a composable `Router` that can be mounted on any axum server.

use axum::routing::get;
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Builds the router over a shared context.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/patients", get(endpoints::patients::list))
        .route("/kpis", get(endpoints::kpis::compute))
        .with_state(ctx)
}
