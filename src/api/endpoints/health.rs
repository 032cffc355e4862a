//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub patients: i64,
    pub version: &'static str,
}

/// `GET /health` — connection check plus record count.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let conn = ctx.db()?;
    let patients = db::patients::count_patients(&conn)?;

    Ok(Json(HealthResponse {
        status: "ok",
        patients,
        version: crate::config::APP_VERSION,
    }))
}
