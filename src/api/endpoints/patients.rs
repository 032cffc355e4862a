//! Patient record listing.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::PatientRecord;

/// `GET /patients` — every record in the store, as stored.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<PatientRecord>>, ApiError> {
    let conn = ctx.db()?;
    let records = db::patients::list_patients(&conn)?;
    Ok(Json(records))
}
