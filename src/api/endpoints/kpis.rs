//! Aggregate indicator endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::Kpis;

/// `GET /kpis` — totals and readmission rate over the whole store.
/// An empty store reports zeros rather than an error.
pub async fn compute(State(ctx): State<ApiContext>) -> Result<Json<Kpis>, ApiError> {
    let conn = ctx.db()?;
    let kpis = db::patients::compute_kpis(&conn)?;
    Ok(Json(kpis))
}
